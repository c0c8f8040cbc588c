//! Ruling-line removal.
//!
//! Scanned invoices carry long horizontal rules around tables and totals
//! that merge with glyph strokes and degrade recognition. Lines are
//! isolated with a wide flat morphological opening, erased from the color
//! image, and the small gaps cut into overlapping glyphs are repaired with
//! a closing pass.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use super::morphology;
use crate::error::Result;
use crate::models::config::StripConfig;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Detects and erases long horizontal ruling lines from page images,
/// overwriting each file in place.
pub struct LineStripper {
    config: StripConfig,
}

impl LineStripper {
    /// Create a stripper with the given configuration.
    pub fn new(config: StripConfig) -> Self {
        Self { config }
    }

    /// Strip ruling lines from every image in `paths`, in place. The
    /// caller's path list stays valid; files are rewritten at the same
    /// locations.
    pub fn strip_all(&self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            let erased = self.strip(path)?;
            debug!("Erased {} line regions from {}", erased, path.display());
        }
        Ok(())
    }

    /// Strip ruling lines from a single image, overwriting the file.
    /// Returns the number of erased line regions. When no lines are
    /// detected only the gap-repair step runs, which leaves a gap-free
    /// image unchanged apart from re-encoding.
    pub fn strip(&self, path: &Path) -> Result<usize> {
        let dynamic = image::open(path)?;
        let mut color = dynamic.to_rgb8();
        let gray = dynamic.to_luma8();

        let binary = morphology::binarize_inverted(&gray);
        let detected = morphology::open_rect(
            &binary,
            self.config.kernel_width.max(1),
            1,
            self.config.open_iterations,
        );

        let mut erased = 0usize;
        for contour in find_contours::<u32>(&detected) {
            if contour.border_type != BorderType::Outer || contour.points.is_empty() {
                continue;
            }
            self.erase_region(&mut color, &contour.points);
            erased += 1;
        }

        let repaired = self.repair_gaps(&color);
        repaired.save(path)?;

        Ok(erased)
    }

    /// Paint the bounding rectangle of a detected line region white,
    /// expanded by the erase margin so residual anti-aliasing goes with it.
    fn erase_region(&self, color: &mut RgbImage, points: &[imageproc::point::Point<u32>]) {
        let (width, height) = color.dimensions();

        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let margin = self.config.erase_margin;
        let x0 = min_x.saturating_sub(margin);
        let y0 = min_y.saturating_sub(margin);
        let x1 = (max_x + margin).min(width - 1);
        let y1 = (max_y + margin).min(height - 1);

        let rect = Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0 + 1, y1 - y0 + 1);
        draw_filled_rect_mut(color, rect, WHITE);
    }

    /// Fill small gaps left in glyphs that crossed an erased line: close
    /// the inverted image with a small kernel, then invert back. Gap-free
    /// strokes pass through unchanged.
    fn repair_gaps(&self, color: &RgbImage) -> RgbImage {
        let mut inverted = color.clone();
        image::imageops::invert(&mut inverted);

        let closed = morphology::close_rect_rgb(
            &inverted,
            self.config.repair_kernel_width.max(1),
            self.config.repair_kernel_height.max(1),
        );

        let mut restored = closed;
        image::imageops::invert(&mut restored);
        restored
    }
}
