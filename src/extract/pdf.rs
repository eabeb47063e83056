//! PDF text extraction.
//!
//! Pure text concatenation in page order; no heading or table awareness.

use crate::error::{LesError, Result};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Extract all text from a PDF, joining page texts with single spaces.
pub fn extract_text(path: &Path) -> Result<String> {
    let doc = Document::load(path)
        .map_err(|e| LesError::Extraction(format!("Failed to open PDF: {}", e)))?;

    let mut pages = Vec::new();
    // get_pages returns a BTreeMap keyed by page number, so iteration
    // preserves page order.
    for (page_number, _) in doc.get_pages() {
        let text = doc
            .extract_text(&[page_number])
            .map_err(|e| {
                LesError::Extraction(format!("Failed to extract page {}: {}", page_number, e))
            })?;
        pages.push(text);
    }

    debug!("Extracted text from {} pages", pages.len());
    Ok(join_pages(&pages))
}

/// Join per-page text with single spaces, trimming each page.
pub fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_space_separated_in_order() {
        let pages = vec!["Hello world.".to_string(), "Hello world.".to_string()];
        assert_eq!(join_pages(&pages), "Hello world. Hello world.");
    }

    #[test]
    fn test_join_pages_trims_page_whitespace() {
        let pages = vec!["First page.\n".to_string(), "  Second page.".to_string()];
        assert_eq!(join_pages(&pages), "First page. Second page.");
    }

    #[test]
    fn test_join_pages_skips_empty_pages() {
        let pages = vec![
            "Intro.".to_string(),
            "\n".to_string(),
            "Outro.".to_string(),
        ];
        assert_eq!(join_pages(&pages), "Intro. Outro.");
    }

    #[test]
    fn test_extract_text_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();
        assert!(extract_text(&path).is_err());
    }
}
