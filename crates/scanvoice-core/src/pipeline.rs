//! End-to-end extraction pipeline.
//!
//! PDF bytes -> page images -> cleaned images -> per-page text -> fields.
//! Pages are processed one at a time in a single pass; every stage blocks
//! until complete. Callers needing responsiveness impose timeouts
//! externally. Each run's page images live under the caller-given work
//! directory; concurrent runs must use distinct directories since pages
//! collide by filename.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::invoice::FieldParser;
use crate::models::config::ScanvoiceConfig;
use crate::models::fields::PipelineOutput;
use crate::ocr::{LayoutReconstructor, LineStripper, TesseractEngine};
use crate::pdf::PageRasterizer;

/// Orchestrates rasterization, line removal, OCR, and field extraction.
pub struct InvoicePipeline {
    config: ScanvoiceConfig,
}

impl InvoicePipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: ScanvoiceConfig) -> Self {
        Self { config }
    }

    /// Process the PDF at `pdf_path`, writing page images under
    /// `work_dir`. Returns the reconstructed per-page texts and the
    /// extracted fields. An unreadable PDF or image is fatal for the run;
    /// unresolved fields are not.
    pub fn run(&self, pdf_path: &Path, work_dir: &Path) -> Result<PipelineOutput> {
        let start = Instant::now();

        info!("Processing {}", pdf_path.display());

        let rasterizer = PageRasterizer::new(self.config.render.clone());
        let image_paths = rasterizer.rasterize(pdf_path, work_dir)?;

        let stripper = LineStripper::new(self.config.strip.clone());
        stripper.strip_all(&image_paths)?;

        let engine = TesseractEngine::new(self.config.ocr.clone())?;
        let reconstructor = LayoutReconstructor::new(self.config.layout.clone());

        let mut page_texts = Vec::with_capacity(image_paths.len());
        for path in &image_paths {
            let tokens = engine.recognize(path)?;
            let text = reconstructor.reconstruct(&tokens);
            debug!(
                "Page {}: {} tokens, {} chars of text",
                path.display(),
                tokens.len(),
                text.len()
            );
            page_texts.push(text);
        }

        let parser = FieldParser::new(self.config.extraction.clone());
        let fields = parser.parse_pages(&page_texts);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Processed {} pages in {}ms",
            page_texts.len(),
            processing_time_ms
        );

        Ok(PipelineOutput {
            page_texts,
            fields,
            processing_time_ms,
        })
    }
}

impl Default for InvoicePipeline {
    fn default() -> Self {
        Self::new(ScanvoiceConfig::default())
    }
}
