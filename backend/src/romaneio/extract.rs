use super::TextExtractor;
use crate::error::{AppError, AppResult};
use log::debug;
use lopdf::Document;

/// Page text extraction backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn page_texts(&self, bytes: &[u8]) -> AppResult<Vec<String>> {
        let document =
            Document::load_mem(bytes).map_err(|e| AppError::Processing(e.to_string()))?;
        let pages = document.get_pages();
        debug!("Extracting text from {} PDF page(s)", pages.len());

        // get_pages is keyed by page number, so iteration follows page order.
        pages
            .keys()
            .map(|number| {
                document
                    .extract_text(&[*number])
                    .map_err(|e| AppError::Processing(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_pdf_is_a_processing_error() {
        let err = LopdfExtractor
            .page_texts(b"not a pdf at all")
            .unwrap_err();
        assert!(matches!(err, AppError::Processing(_)));
    }
}
