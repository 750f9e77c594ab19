//! PDF text extraction. Pulls per-page text out of an in-memory PDF and
//! concatenates it with page-break markers so downstream prompts can tell
//! where one page ends and the next begins.

use crate::error::{ExtractorError, Result};
use log::{debug, warn};
use lopdf::Document;

/// Marker inserted between pages of extracted text.
pub const PAGE_BREAK: &str = "\n\n--- Page Break ---\n\n";

/// Extracts the text of every page of `bytes`, in page order, joined with
/// [`PAGE_BREAK`].
///
/// A page whose text cannot be decoded is warned about and omitted; the rest
/// of the document still goes through. Only an unreadable document, or a
/// document where no page yields text, is an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes)?;
    let pages = document.get_pages();

    let mut text = String::new();
    let mut extracted_pages = 0usize;

    for &page_number in pages.keys() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => {
                if extracted_pages > 0 {
                    text.push_str(PAGE_BREAK);
                }
                text.push_str(page_text.trim_end());
                extracted_pages += 1;
            }
            Err(e) => {
                warn!(
                    "Skipping page {}: text extraction failed: {}",
                    page_number, e
                );
            }
        }
    }

    if extracted_pages == 0 || text.trim().is_empty() {
        return Err(ExtractorError::EmptyDocument);
    }

    debug!(
        "Extracted {} characters from {} of {} pages",
        text.len(),
        extracted_pages,
        pages.len()
    );

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_a_read_error() {
        let result = extract_pdf_text(b"not a pdf at all");
        assert!(matches!(result, Err(ExtractorError::PdfRead(_))));
    }
}
