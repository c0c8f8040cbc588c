//! Core library for scanned-invoice field extraction.
//!
//! This crate provides:
//! - PDF page rasterization (Pdfium)
//! - Ruling-line removal and glyph gap repair
//! - Layout-aware OCR text reconstruction (Tesseract)
//! - Heuristic extraction of total amount, invoice date, account name,
//!   and company name

pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;

pub use error::{OcrError, PdfError, Result, ScanError};
pub use invoice::FieldParser;
pub use models::config::ScanvoiceConfig;
pub use models::fields::{InvoiceFields, PipelineOutput};
pub use ocr::{LayoutReconstructor, LineStripper, OcrToken, TesseractEngine};
pub use pdf::PageRasterizer;
pub use pipeline::InvoicePipeline;
