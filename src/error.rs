//! Error types for the financial document crew

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for crew operations
pub type Result<T> = std::result::Result<T, OrchestrationError>;

/// Prefix shared by every rendered ingestion failure.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Error, Debug)]
pub enum OrchestrationError {

    // =============================
    // Tool Errors
    // =============================

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Invalid tool input: {0}")]
    InvalidToolInput(String),

    // =============================
    // Configuration Errors
    // =============================

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Failures while turning a document on disk into text.
///
/// The set is closed: every way the loader can fail maps to exactly one
/// variant, and every variant renders to a distinct message starting with
/// [`ERROR_PREFIX`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestionError {
    #[error("Error: File '{path}' not found. Please upload a PDF file.")]
    FileNotFound { path: String },

    #[error("Error: PDF support is not available in this build. Enable the 'pdf' feature.")]
    CapabilityUnavailable,

    #[error("Error: Could not read PDF ({kind}): {message}")]
    ParseFailure { kind: String, message: String },

    #[error("Error: PDF file has no pages or is corrupted.")]
    EmptyDocument,

    #[error("Error: PDF file is empty or text could not be extracted.")]
    NoExtractableText,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IngestionErrorKind {
    FileNotFound,
    CapabilityUnavailable,
    ParseFailure,
    EmptyDocument,
    NoExtractableText,
}

impl IngestionError {
    pub fn kind(&self) -> IngestionErrorKind {
        match self {
            IngestionError::FileNotFound { .. } => IngestionErrorKind::FileNotFound,
            IngestionError::CapabilityUnavailable => IngestionErrorKind::CapabilityUnavailable,
            IngestionError::ParseFailure { .. } => IngestionErrorKind::ParseFailure,
            IngestionError::EmptyDocument => IngestionErrorKind::EmptyDocument,
            IngestionError::NoExtractableText => IngestionErrorKind::NoExtractableText,
        }
    }

    pub fn parse_failure(kind: impl Into<String>, message: impl fmt::Display) -> Self {
        IngestionError::ParseFailure {
            kind: kind.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for IngestionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IngestionErrorKind::FileNotFound => "file_not_found",
            IngestionErrorKind::CapabilityUnavailable => "capability_unavailable",
            IngestionErrorKind::ParseFailure => "parse_failure",
            IngestionErrorKind::EmptyDocument => "empty_document",
            IngestionErrorKind::NoExtractableText => "no_extractable_text",
        };
        write!(f, "{}", s)
    }
}

/// True when a rendered tool observation is an ingestion failure.
pub fn is_error_message(observation: &str) -> bool {
    observation.starts_with(ERROR_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_errors() -> Vec<IngestionError> {
        vec![
            IngestionError::FileNotFound {
                path: "data/sample.pdf".to_string(),
            },
            IngestionError::CapabilityUnavailable,
            IngestionError::parse_failure("Header", "invalid file header"),
            IngestionError::EmptyDocument,
            IngestionError::NoExtractableText,
        ]
    }

    #[test]
    fn test_every_failure_has_error_prefix() {
        for err in all_errors() {
            let message = err.to_string();
            assert!(is_error_message(&message), "missing prefix: {}", message);
        }
    }

    #[test]
    fn test_messages_and_kinds_are_distinct() {
        let errors = all_errors();

        let messages: HashSet<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), errors.len());

        let kinds: HashSet<IngestionErrorKind> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_file_not_found_message() {
        let err = IngestionError::FileNotFound {
            path: "data/sample.pdf".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error: File 'data/sample.pdf' not found. Please upload a PDF file."
        );
    }

    #[test]
    fn test_parse_failure_names_kind_and_message() {
        let err = IngestionError::parse_failure("Xref", "missing xref table");
        assert_eq!(
            err.to_string(),
            "Error: Could not read PDF (Xref): missing xref table"
        );
    }

    #[test]
    fn test_plain_text_is_not_an_error() {
        assert!(!is_error_message("[PDF Document - 1 pages]\n\n"));
        assert!(!is_error_message("Error reading nothing"));
    }
}
