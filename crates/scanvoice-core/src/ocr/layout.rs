//! Layout-aware text reconstruction.
//!
//! Tesseract returns tokens with absolute pixel coordinates but no layout
//! semantics. Invoices carry meaning in their positional layout (label
//! columns, amount columns, tables), so tokens are reassembled into a
//! character grid: block by block in vertical order, with newlines at
//! paragraph/line boundaries and space padding approximating horizontal
//! offsets, scaled by an estimated character width.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::OcrToken;
use crate::models::config::LayoutConfig;

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(" +").unwrap();
}

/// Reassembles OCR tokens into plain text approximating the page layout.
pub struct LayoutReconstructor {
    config: LayoutConfig,
}

impl LayoutReconstructor {
    /// Create a reconstructor with the given layout configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Rebuild the page text from recognized tokens. Tokens with the
    /// no-detection sentinel or empty/single-space text are discarded;
    /// blocks are emitted in order of their first token's vertical
    /// position. The result has runs of spaces collapsed and surrounding
    /// whitespace trimmed.
    pub fn reconstruct(&self, tokens: &[OcrToken]) -> String {
        let usable: Vec<&OcrToken> = tokens.iter().filter(|t| t.is_usable()).collect();
        if usable.is_empty() {
            return String::new();
        }

        // Group by block number, keeping scan order within each block.
        let mut block_order: Vec<u32> = Vec::new();
        let mut blocks: HashMap<u32, Vec<&OcrToken>> = HashMap::new();
        for &token in &usable {
            let entry = blocks.entry(token.block).or_default();
            if entry.is_empty() {
                block_order.push(token.block);
            }
            entry.push(token);
        }

        // Blocks read top to bottom even when Tesseract numbered them
        // out of order.
        block_order.sort_by_key(|block| blocks[block][0].top);

        let mut text = String::new();
        for block in &block_order {
            let block_tokens = &blocks[block];
            let char_width = self.estimate_char_width(block_tokens);
            debug!(
                "Block {}: {} tokens, {:.1} px/char",
                block,
                block_tokens.len(),
                char_width
            );

            self.emit_block(&mut text, block_tokens, char_width);
        }

        let collapsed = MULTI_SPACE.replace_all(&text, " ");
        collapsed.trim().to_string()
    }

    /// Representative character width for a block: mean of width per
    /// character over tokens long enough to give a stable ratio. Short
    /// tokens (single letters, punctuation) are skipped because their
    /// boxes are dominated by glyph shape rather than text length.
    fn estimate_char_width(&self, tokens: &[&OcrToken]) -> f32 {
        let samples: Vec<f32> = tokens
            .iter()
            .filter(|t| t.char_count() > self.config.min_token_chars)
            .map(|t| t.width as f32 / t.char_count() as f32)
            .collect();

        if samples.is_empty() {
            return self.config.default_char_width;
        }

        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        if mean > f32::EPSILON {
            mean
        } else {
            self.config.default_char_width
        }
    }

    fn emit_block(&self, text: &mut String, tokens: &[&OcrToken], char_width: f32) {
        let mut prev_paragraph = 0u32;
        let mut prev_line = 0u32;
        let mut cursor = 0usize;

        for token in tokens {
            if token.paragraph != prev_paragraph {
                text.push('\n');
                prev_paragraph = token.paragraph;
                prev_line = token.line;
                cursor = 0;
            } else if token.line != prev_line {
                text.push('\n');
                prev_line = token.line;
                cursor = 0;
            }

            let expected = token.left as f32 / char_width;
            let mut padding = 0usize;
            if expected > cursor as f32 + self.config.padding_threshold {
                padding = (expected as usize).saturating_sub(cursor);
                for _ in 0..padding {
                    text.push(' ');
                }
            }

            text.push_str(&token.text);
            text.push(' ');
            cursor += token.char_count() + padding + 1;
        }

        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(
        text: &str,
        block: u32,
        paragraph: u32,
        line: u32,
        left: u32,
        top: u32,
        width: u32,
    ) -> OcrToken {
        OcrToken {
            text: text.to_string(),
            confidence: 90.0,
            left,
            top,
            width,
            height: 20,
            block,
            paragraph,
            line,
            word: 1,
        }
    }

    fn reconstructor() -> LayoutReconstructor {
        LayoutReconstructor::new(LayoutConfig::default())
    }

    #[test]
    fn test_single_line_joins_tokens() {
        let tokens = vec![
            token("Invoice", 1, 1, 1, 0, 10, 70),
            token("Date:", 1, 1, 1, 80, 10, 50),
        ];

        assert_eq!(reconstructor().reconstruct(&tokens), "Invoice Date:");
    }

    #[test]
    fn test_line_change_emits_newline() {
        let tokens = vec![
            token("Total", 1, 1, 1, 0, 10, 50),
            token("1,234.56", 1, 1, 2, 0, 40, 80),
        ];

        assert_eq!(reconstructor().reconstruct(&tokens), "Total \n1,234.56");
    }

    #[test]
    fn test_paragraph_change_emits_newline() {
        let tokens = vec![
            token("Header", 1, 1, 1, 0, 10, 60),
            token("Body", 1, 2, 1, 0, 60, 40),
        ];

        assert_eq!(reconstructor().reconstruct(&tokens), "Header \nBody");
    }

    #[test]
    fn test_blocks_ordered_by_top() {
        // Block 2 sits above block 1 on the page.
        let tokens = vec![
            token("lower", 1, 1, 1, 0, 500, 50),
            token("upper", 2, 1, 1, 0, 20, 50),
        ];

        let text = reconstructor().reconstruct(&tokens);
        assert_eq!(text, "upper \n\nlower");
    }

    #[test]
    fn test_sentinel_tokens_yield_empty_string() {
        let mut a = token("ghost", 1, 1, 1, 0, 10, 50);
        a.confidence = -1.0;
        let mut b = token("", 1, 1, 1, 60, 10, 10);
        b.confidence = -1.0;

        assert_eq!(reconstructor().reconstruct(&[a, b]), "");
    }

    #[test]
    fn test_empty_and_space_tokens_discarded() {
        let tokens = vec![
            token("", 1, 1, 1, 0, 10, 5),
            token(" ", 1, 1, 1, 10, 10, 5),
            token("kept", 1, 1, 1, 20, 10, 40),
        ];

        assert_eq!(reconstructor().reconstruct(&tokens), "kept");
    }

    #[test]
    fn test_runs_of_spaces_collapse() {
        // Far right offset would pad heavily; collapse reduces it to one
        // space in the final string.
        let tokens = vec![
            token("Label", 1, 1, 1, 0, 10, 50),
            token("999.00", 1, 1, 1, 400, 10, 60),
        ];

        assert_eq!(reconstructor().reconstruct(&tokens), "Label 999.00");
    }

    #[test]
    fn test_default_char_width_for_short_tokens() {
        let tokens = vec![token("ab", 1, 1, 1, 0, 10, 90)];
        let estimated = reconstructor().estimate_char_width(&tokens.iter().collect::<Vec<_>>());

        assert_eq!(estimated, 10.0);
    }

    #[test]
    fn test_char_width_from_long_tokens() {
        let tokens = vec![token("invoice", 1, 1, 1, 0, 10, 70)];
        let estimated = reconstructor().estimate_char_width(&tokens.iter().collect::<Vec<_>>());

        assert!((estimated - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_identical_tokens_identical_text() {
        let tokens = vec![
            token("Sub", 1, 1, 1, 0, 10, 30),
            token("Total", 1, 1, 1, 40, 10, 50),
        ];

        let r = reconstructor();
        assert_eq!(r.reconstruct(&tokens), r.reconstruct(&tokens));
    }
}
