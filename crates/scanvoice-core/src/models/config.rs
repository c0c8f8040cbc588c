//! Configuration structures for the extraction pipeline.
//!
//! The morphology kernel sizes and layout constants are empirically tuned
//! against typical invoice fonts and scan resolutions; they are kept here
//! as explicit fields so deployments can retune them without code changes.

use serde::{Deserialize, Serialize};

/// Main configuration for the scanvoice pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanvoiceConfig {
    /// Page rasterization configuration.
    pub render: RenderConfig,

    /// Ruling-line removal configuration.
    pub strip: StripConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Layout reconstruction configuration.
    pub layout: LayoutConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Page rasterization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Zoom factor applied to each page; output pixel dimensions scale
    /// linearly with this value.
    pub zoom: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { zoom: 6.0 }
    }
}

/// Ruling-line removal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Width of the horizontal structuring element in pixels. Dark runs
    /// shorter than this survive the opening and are treated as text.
    pub kernel_width: u32,

    /// Number of erode/dilate iterations for the opening.
    pub open_iterations: u32,

    /// Extra pixels painted around each detected line region, covering
    /// residual anti-aliasing.
    pub erase_margin: u32,

    /// Width of the gap-repair closing kernel.
    pub repair_kernel_width: u32,

    /// Height of the gap-repair closing kernel.
    pub repair_kernel_height: u32,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            kernel_width: 25,
            open_iterations: 2,
            erase_margin: 1,
            repair_kernel_width: 3,
            repair_kernel_height: 6,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code (e.g., "eng").
    pub language: String,

    /// OCR engine mode (1 = LSTM only).
    pub engine_mode: u32,

    /// Page segmentation mode (4 = single column of text of variable sizes).
    pub page_seg_mode: u32,

    /// Keep interword spacing in the recognized output.
    pub preserve_interword_spaces: bool,

    /// Sigma for the pre-OCR Gaussian blur (3x3 kernel equivalent).
    pub blur_sigma: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            engine_mode: 1,
            page_seg_mode: 4,
            preserve_interword_spaces: true,
            blur_sigma: 0.8,
        }
    }
}

/// Layout reconstruction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fallback character width in pixels when a block has no token long
    /// enough to estimate one.
    pub default_char_width: f32,

    /// Minimum token length (in characters) for a token to contribute to
    /// the per-block character width estimate.
    pub min_token_chars: usize,

    /// Horizontal gap, in character cells, a token must exceed before
    /// padding spaces are inserted.
    pub padding_threshold: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_char_width: 10.0,
            min_token_chars: 3,
            padding_threshold: 1.0,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Company names (lowercase substrings) excluded from company-name
    /// matching; known false-positive sources.
    pub excluded_companies: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            excluded_companies: vec!["ashoka builders".to_string()],
        }
    }
}

impl ScanvoiceConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
