//! OCR pipeline: ruling-line removal, Tesseract invocation, and
//! layout-aware text reconstruction.

mod engine;
mod layout;
mod lines;
mod morphology;

pub use engine::TesseractEngine;
pub use layout::LayoutReconstructor;
pub use lines::LineStripper;
pub use morphology::{binarize_inverted, close_rect_rgb, dilate_rect, erode_rect, open_rect};

use serde::{Deserialize, Serialize};

/// A single recognized text fragment with its pixel bounding box and the
/// structural grouping indices assigned by the OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrToken {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence (0-100); -1 marks structural rows with no
    /// detection.
    pub confidence: f32,

    /// Left edge of the bounding box in pixels.
    pub left: u32,

    /// Top edge of the bounding box in pixels.
    pub top: u32,

    /// Bounding box width in pixels.
    pub width: u32,

    /// Bounding box height in pixels.
    pub height: u32,

    /// Block number assigned by the engine.
    pub block: u32,

    /// Paragraph number within the block.
    pub paragraph: u32,

    /// Line number within the paragraph.
    pub line: u32,

    /// Word number within the line.
    pub word: u32,
}

impl OcrToken {
    /// Whether this token carries recognized text worth reassembling.
    /// Tokens with the no-detection sentinel confidence, empty text, or a
    /// single-space text are dropped before reconstruction.
    pub fn is_usable(&self) -> bool {
        self.confidence >= 0.0 && !self.text.is_empty() && self.text != " "
    }

    /// Number of characters in the token text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
