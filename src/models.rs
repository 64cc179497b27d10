//! Core data models for the financial document crew

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Document =================
//

/// Text extracted from a single page (1-indexed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// A successfully ingested document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    pub path: String,
    /// Pages in the source document, including those that yielded no text
    pub page_count: usize,
    /// Only pages that yielded text, in page order
    pub pages: Vec<PageText>,
    /// Header, page markers and page text after newline normalization
    pub text: String,
}

//
// ================= Tool I/O =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
}

//
// ================= Execution =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub observation_id: Uuid,
    pub tool_name: String,
    pub tool_input: serde_json::Value,
    pub tool_output: serde_json::Value,
    pub execution_time_ms: u64,
    pub created_at: DateTime<Utc>,
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failed,
    Skipped,
}

//
// ================= Analysis =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// Report returned by the placeholder analysis tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_length: Option<usize>,
    pub message: String,
}

impl AnalysisReport {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Error,
            processed_length: None,
            data_length: None,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_report_omits_absent_lengths() {
        let report = AnalysisReport::error("No valid document data provided");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "error");
        assert!(json.get("processed_length").is_none());
        assert!(json.get("data_length").is_none());
    }
}
