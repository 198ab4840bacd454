use super::ExtractionError;

/// PDF text extraction abstraction (allows mocking for tests).
///
/// Implementations return per-page text; callers usually want the
/// page-concatenated form from [`full_text`].
pub trait PdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;

    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError> {
        Ok(self.extract_pages(pdf_bytes)?.len())
    }
}

/// Concatenate page texts with newline separators, the way the report
/// pipeline consumes them.
pub fn full_text(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}
