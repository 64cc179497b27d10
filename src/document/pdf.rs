//! PDF backend built on lopdf

use super::{PagedDocument, PdfBackend};
use crate::error::IngestionError;
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};

/// Page extraction through lopdf's content-stream text decoder.
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, IngestionError> {
        // lopdf can panic on some malformed cross-reference tables
        let loaded = panic::catch_unwind(AssertUnwindSafe(|| Document::load_mem(bytes)))
            .map_err(|_| {
                IngestionError::parse_failure("Panic", "PDF parser aborted on malformed input")
            })?;

        let document = loaded.map_err(|e| IngestionError::parse_failure(error_kind(&e), &e))?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

        Ok(Box::new(LopdfDocument {
            document,
            page_numbers,
        }))
    }
}

struct LopdfDocument {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PagedDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, number: u32) -> Result<String, IngestionError> {
        let page = number
            .checked_sub(1)
            .and_then(|index| self.page_numbers.get(index as usize))
            .copied()
            .ok_or_else(|| {
                IngestionError::parse_failure("PageOutOfRange", format!("no page {}", number))
            })?;

        let document = &self.document;
        panic::catch_unwind(AssertUnwindSafe(|| document.extract_text(&[page])))
            .map_err(|_| {
                IngestionError::parse_failure("Panic", "text decoder aborted on malformed page")
            })?
            .map_err(|e| IngestionError::parse_failure(error_kind(&e), &e))
    }
}

/// Variant name of a lopdf error, e.g. `Header` or `Xref`.
fn error_kind(err: &lopdf::Error) -> String {
    let debug = format!("{:?}", err);
    debug
        .split(|c: char| !c.is_alphanumeric())
        .find(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}


#[cfg(test)]
mod tests {
    use super::fixtures::build_pdf;
    use super::*;

    #[test]
    fn test_page_count_matches_document() {
        let bytes = build_pdf(&["One", "Two", "Three"]);
        let document = LopdfBackend.open(&bytes).unwrap();
        assert_eq!(document.page_count(), 3);
    }

    #[test]
    fn test_extracts_page_text_in_order() {
        let bytes = build_pdf(&["Alpha", "Beta"]);
        let document = LopdfBackend.open(&bytes).unwrap();

        assert!(document.page_text(1).unwrap().contains("Alpha"));
        assert!(document.page_text(2).unwrap().contains("Beta"));
    }

    #[test]
    fn test_out_of_range_page_is_an_error() {
        let bytes = build_pdf(&["Only"]);
        let document = LopdfBackend.open(&bytes).unwrap();

        assert!(document.page_text(0).is_err());
        assert!(document.page_text(2).is_err());
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_failure() {
        let err = LopdfBackend.open(b"not a pdf").err().unwrap();
        match err {
            IngestionError::ParseFailure { kind, .. } => assert!(!kind.is_empty()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
