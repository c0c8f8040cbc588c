//! PDF rasterization module.

mod rasterizer;

pub use rasterizer::PageRasterizer;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
