//! Financial Document Crew
//!
//! Configuration and tools for a multi-agent financial document review:
//! - Reads PDF documents into page-marked text observations
//! - Reports every ingestion failure as a stable `Error: ` message
//! - Exposes the document reader and analysis stubs as registry tools
//! - Describes the analyst, verifier, advisor and risk assessor roles
//!   as immutable records for an external agent runtime
//!
//! Agent coordination, delegation and memory belong to that runtime.

pub mod config;
pub mod crew;
pub mod document;
pub mod error;
pub mod execution;
pub mod models;
pub mod tools;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use document::{load_document_text, DocumentLoader, DEFAULT_DOCUMENT_PATH};
pub use error::{IngestionError, IngestionErrorKind, OrchestrationError};
