//! Error types for the scanvoice-core library.

use thiserror::Error;

/// Main error type for the scanvoice library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF rasterization.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The Pdfium library could not be located or bound.
    #[error("failed to bind Pdfium library: {0}")]
    Library(String),

    /// Failed to render a page to a bitmap.
    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to initialize the Tesseract engine.
    #[error("failed to initialize Tesseract: {0}")]
    Init(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The engine returned TSV data that could not be parsed.
    #[error("malformed TSV output: {0}")]
    Tsv(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the scanvoice library.
pub type Result<T> = std::result::Result<T, ScanError>;
