//! Data models and configuration.

pub mod config;
pub mod fields;

pub use config::{ExtractionConfig, LayoutConfig, OcrConfig, RenderConfig, ScanvoiceConfig, StripConfig};
pub use fields::{InvoiceFields, PipelineOutput};
