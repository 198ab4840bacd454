use super::types::PdfExtractor;
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned documents
/// come back empty and are reported as such.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        tracing::info!(
            page_count = pages.len(),
            chars = pages.iter().map(|p| p.len()).sum::<usize>(),
            "extracted text from PDF"
        );

        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(pages)
    }
}
