//! Report analysis pipeline.
//!
//! Stages: PDF text extraction → sanitization → term/value recognition →
//! reference-range classification → LLM explanation and summary. Each stage
//! degrades independently; only extraction failures abort a report.

pub mod analysis;
pub mod extraction;
pub mod processor;
pub mod rag;

pub use processor::{ProcessingError, ReportProcessor};
