// src/pdf/mod.rs
use std::path::Path;

use crate::utils::error::PdfError;

/// Abstraction over the PDF text-extraction backend.
///
/// The batch driver only needs "given a file path, return its full extracted
/// text"; keeping that behind a trait lets tests substitute a stub source.
pub trait TextSource {
    /// Extract the full text content of a PDF file.
    fn extract_text(&self, path: &Path) -> Result<String, PdfError>;
}

/// Production backend built on the `pdf-extract` crate.
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, path: &Path) -> Result<String, PdfError> {
        pdf_extract::extract_text(path).map_err(|e| PdfError::Extraction(e.to_string()))
    }
}
