//! Page rasterization using Pdfium.

use std::fs;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;
use tracing::{debug, info};

use super::Result;
use crate::error::PdfError;
use crate::models::config::RenderConfig;

/// Renders each page of a PDF document to a JPEG image at a fixed zoom
/// factor. Output files are named by zero-based page index.
pub struct PageRasterizer {
    config: RenderConfig,
}

impl PageRasterizer {
    /// Create a rasterizer with the given render configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render every page of the PDF at `pdf_path` into `image_dir`,
    /// creating the directory if needed. Returns the ordered list of
    /// written image paths. Existing files with the same names are
    /// overwritten.
    pub fn rasterize(&self, pdf_path: &Path, image_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(image_dir)
            .map_err(|e| PdfError::Parse(format!("failed to create {}: {}", image_dir.display(), e)))?;

        let data = fs::read(pdf_path)
            .map_err(|e| PdfError::Parse(format!("failed to read {}: {}", pdf_path.display(), e)))?;

        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(PdfError::Parse("not a valid PDF file".to_string()));
        }

        let pdfium = bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(&data, None)
            .map_err(|e| PdfError::Parse(e.to_string()))?;

        let pages = document.pages();
        let page_count = pages.len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        info!(
            "Rasterizing {} pages from {} at {}x zoom",
            page_count,
            pdf_path.display(),
            self.config.zoom
        );

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.config.zoom);

        let mut image_paths = Vec::with_capacity(page_count as usize);

        for (index, page) in pages.iter().enumerate() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| PdfError::Render {
                    page: index as u32,
                    reason: e.to_string(),
                })?;

            // JPEG has no alpha channel; drop it before encoding.
            let rgb = bitmap.as_image().to_rgb8();
            let image_path = image_dir.join(format!("{}.jpg", index));

            rgb.save(&image_path).map_err(|e| PdfError::Render {
                page: index as u32,
                reason: format!("failed to write {}: {}", image_path.display(), e),
            })?;

            debug!(
                "Rendered page {} -> {} ({}x{})",
                index,
                image_path.display(),
                rgb.width(),
                rgb.height()
            );

            image_paths.push(image_path);
        }

        Ok(image_paths)
    }
}

/// Bind to a Pdfium library next to the executable, in `./lib`, or on the
/// system library path, in that order.
fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./lib/"))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| PdfError::Library(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}
