//! Document loader
//!
//! Turns a PDF on disk into a single text observation:
//! a page-count header, one `--- Page i ---` block per page that
//! yielded text, and blank-line runs collapsed to at most one empty line.
//!
//! Every failure is an [`IngestionError`]; [`load_document_text`] renders
//! it so callers always receive a string.

use crate::error::IngestionError;
use crate::models::{DocumentText, PageText};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod normalize;
#[cfg(feature = "pdf")]
pub mod pdf;

pub use normalize::{collapse_blank_lines, collapse_spaces};

/// Location used when no path is given.
pub const DEFAULT_DOCUMENT_PATH: &str = "data/sample.pdf";

/// Parses raw bytes into a paginated document.
pub trait PdfBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, IngestionError>;
}

/// A parsed document whose pages can be extracted one at a time.
pub trait PagedDocument {
    fn page_count(&self) -> usize;

    /// Text of a 1-indexed page
    fn page_text(&self, number: u32) -> Result<String, IngestionError>;
}

/// The backend compiled into this build, if any.
pub fn default_backend() -> Option<Arc<dyn PdfBackend>> {
    #[cfg(feature = "pdf")]
    {
        Some(Arc::new(pdf::LopdfBackend))
    }

    #[cfg(not(feature = "pdf"))]
    {
        None
    }
}

/// Loads PDFs into [`DocumentText`]. Stateless; one read and one parse
/// per call.
#[derive(Clone)]
pub struct DocumentLoader {
    backend: Option<Arc<dyn PdfBackend>>,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self {
            backend: default_backend(),
        }
    }

    pub fn with_backend(backend: Arc<dyn PdfBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A loader with no PDF capability; every existing file fails with
    /// [`IngestionError::CapabilityUnavailable`].
    pub fn without_backend() -> Self {
        Self { backend: None }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<DocumentText, IngestionError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.exists() {
            debug!(path = %path_str, "Document not found");
            return Err(IngestionError::FileNotFound { path: path_str });
        }

        let backend = self
            .backend
            .as_ref()
            .ok_or(IngestionError::CapabilityUnavailable)?;

        let bytes = read_bytes(path, &path_str)?;
        if bytes.is_empty() {
            return Err(IngestionError::EmptyDocument);
        }

        debug!(
            path = %path_str,
            backend = backend.name(),
            size_bytes = bytes.len(),
            "Parsing document"
        );

        let document = backend.open(&bytes)?;
        let page_count = document.page_count();

        if page_count == 0 {
            return Err(IngestionError::EmptyDocument);
        }

        let mut pages = Vec::with_capacity(page_count);

        for number in (1..=page_count).map(|n| n as u32) {
            let text = document.page_text(number).map_err(|e| {
                warn!(path = %path_str, page = number, error = %e, "Page extraction failed");
                e
            })?;

            // Whitespace-only pages are dropped along with empty ones
            if text.trim().is_empty() {
                debug!(path = %path_str, page = number, "Page has no text");
                continue;
            }

            pages.push(PageText { number, text });
        }

        if pages.is_empty() {
            return Err(IngestionError::NoExtractableText);
        }

        let text = collapse_blank_lines(&render(page_count, &pages));
        if text.trim().is_empty() {
            return Err(IngestionError::NoExtractableText);
        }

        info!(
            path = %path_str,
            pages = page_count,
            pages_with_text = pages.len(),
            chars = text.len(),
            "Document loaded"
        );

        Ok(DocumentText {
            path: path_str,
            page_count,
            pages,
            text,
        })
    }

    /// Load and render to the observation string: the document text on
    /// success, the error message otherwise.
    pub fn load_text(&self, path: impl AsRef<Path>) -> String {
        match self.load(path) {
            Ok(document) => document.text,
            Err(e) => {
                warn!(kind = %e.kind(), "Document ingestion failed");
                e.to_string()
            }
        }
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a document with the default backend and render the result.
pub fn load_document_text(path: impl AsRef<Path>) -> String {
    DocumentLoader::new().load_text(path)
}

fn read_bytes(path: &Path, display: &str) -> Result<Vec<u8>, IngestionError> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IngestionError::FileNotFound {
            path: display.to_string(),
        },
        kind => IngestionError::parse_failure(format!("{:?}", kind), e),
    })
}

fn render(page_count: usize, pages: &[PageText]) -> String {
    let mut out = format!("[PDF Document - {} pages]\n\n", page_count);

    for page in pages {
        out.push_str(&format!("--- Page {} ---\n{}\n\n", page.number, page.text));
    }

    out
}
