//! Tesseract invocation via leptess.
//!
//! The engine is treated as a black box: a cleaned page image goes in,
//! word-level TSV rows come out. Each row carries the token text, a
//! confidence score, the pixel bounding box, and the block/paragraph/line
//! structure Tesseract assigned while segmenting the page.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use imageproc::filter::gaussian_blur_f32;
use leptess::{LepTess, Variable};
use tracing::debug;

use super::OcrToken;
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Word-level rows in Tesseract TSV output.
const TSV_WORD_LEVEL: u32 = 5;

/// OCR engine wrapper configured for single-column invoice pages.
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create an engine, verifying that Tesseract initializes with the
    /// configured language data.
    pub fn new(config: OcrConfig) -> Result<Self, OcrError> {
        let _probe = LepTess::new(None, &config.language).map_err(|e| {
            OcrError::Init(format!(
                "language '{}' unavailable: {} (is the tessdata pack installed?)",
                config.language, e
            ))
        })?;

        Ok(Self { config })
    }

    /// Recognize text in the image at `path`. The image is loaded
    /// grayscale and lightly blurred to soften anti-aliasing before it is
    /// handed to Tesseract. Returns all word-level tokens, including ones
    /// the reconstructor will later discard.
    pub fn recognize(&self, path: &Path) -> Result<Vec<OcrToken>, OcrError> {
        let dynamic = image::open(path)
            .map_err(|e| OcrError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        let gray = dynamic.to_luma8();
        let blurred = gaussian_blur_f32(&gray, self.config.blur_sigma);

        // leptess expects encoded image bytes.
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(blurred)
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(format!("failed to encode page: {}", e)))?;

        let mut engine = self.init_engine()?;
        engine
            .set_image_from_mem(png.get_ref())
            .map_err(|e| OcrError::Recognition(format!("failed to set image: {}", e)))?;

        let tsv = engine
            .get_tsv_text(0)
            .map_err(|e| OcrError::Tsv(e.to_string()))?;

        let tokens = parse_tsv(&tsv);
        debug!("Recognized {} word tokens in {}", tokens.len(), path.display());

        Ok(tokens)
    }

    fn init_engine(&self) -> Result<LepTess, OcrError> {
        let mut engine = LepTess::new(None, &self.config.language)
            .map_err(|e| OcrError::Init(e.to_string()))?;

        engine
            .set_variable(
                Variable::TesseditOcrEngineMode,
                &self.config.engine_mode.to_string(),
            )
            .map_err(|e| OcrError::Init(format!("failed to set engine mode: {}", e)))?;

        engine
            .set_variable(
                Variable::TesseditPagesegMode,
                &self.config.page_seg_mode.to_string(),
            )
            .map_err(|e| OcrError::Init(format!("failed to set page segmentation mode: {}", e)))?;

        if self.config.preserve_interword_spaces {
            engine
                .set_variable(Variable::PreserveInterwordSpaces, "1")
                .map_err(|e| OcrError::Init(format!("failed to set interword spacing: {}", e)))?;
        }

        Ok(engine)
    }
}

/// Parse Tesseract TSV output into word-level tokens. Structural rows
/// (page/block/paragraph/line) and malformed lines are skipped.
fn parse_tsv(tsv: &str) -> Vec<OcrToken> {
    let mut tokens = Vec::new();

    for line in tsv.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // A non-numeric level field marks the header row.
        let level: u32 = match fields[0].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if level != TSV_WORD_LEVEL {
            continue;
        }

        let parsed = (
            fields[2].parse::<u32>(),
            fields[3].parse::<u32>(),
            fields[4].parse::<u32>(),
            fields[5].parse::<u32>(),
            fields[6].parse::<u32>(),
            fields[7].parse::<u32>(),
            fields[8].parse::<u32>(),
            fields[9].parse::<u32>(),
            fields[10].parse::<f32>(),
        );

        if let (
            Ok(block),
            Ok(paragraph),
            Ok(line_num),
            Ok(word),
            Ok(left),
            Ok(top),
            Ok(width),
            Ok(height),
            Ok(confidence),
        ) = parsed
        {
            tokens.push(OcrToken {
                text: fields[11..].join("\t"),
                confidence,
                left,
                top,
                width,
                height,
                block,
                paragraph,
                line: line_num,
                word,
            });
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_TSV: &str = "\
level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t600\t800\t-1\t
2\t1\t1\t0\t0\t0\t40\t50\t500\t100\t-1\t
5\t1\t1\t1\t1\t1\t40\t50\t120\t28\t96.5\tInvoice
5\t1\t1\t1\t1\t2\t180\t50\t80\t28\t91.2\tDate
5\t1\t1\t1\t2\t1\t40\t90\t60\t28\t-1\t
5\t1\t2\t1\t1\t1\t40\t200\t90\t28\t88.0\tTotal";

    #[test]
    fn test_parse_tsv_keeps_word_rows() {
        let tokens = parse_tsv(SAMPLE_TSV);
        assert_eq!(tokens.len(), 4);

        assert_eq!(tokens[0].text, "Invoice");
        assert_eq!(tokens[0].block, 1);
        assert_eq!(tokens[0].paragraph, 1);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].left, 40);
        assert!((tokens[0].confidence - 96.5).abs() < 0.01);
    }

    #[test]
    fn test_parse_tsv_marks_sentinel_rows() {
        let tokens = parse_tsv(SAMPLE_TSV);
        let sentinel = &tokens[2];

        assert_eq!(sentinel.confidence, -1.0);
        assert!(!sentinel.is_usable());
    }

    #[test]
    fn test_parse_tsv_skips_malformed_lines() {
        let tokens = parse_tsv("garbage\nonly\tthree\tfields\n");
        assert!(tokens.is_empty());
    }
}
