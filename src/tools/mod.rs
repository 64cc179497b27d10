//! Tool trait and registry
//!
//! Tools are what the external agent runtime invokes. Domain failures
//! (missing document, empty input) come back inside `ToolOutput`;
//! `Err` is reserved for malformed tool input.

use crate::config::Settings;
use crate::document::{collapse_spaces, DocumentLoader};
use crate::error::OrchestrationError;
use crate::models::{AnalysisReport, AnalysisStatus, ToolInput, ToolOutput};
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Trait for a single tool
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput>;
}

/// Tool registry for looking up and executing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// (name, description) pairs, sorted by name
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        let mut items: Vec<_> = self
            .tools
            .values()
            .map(|tool| (tool.name(), tool.description()))
            .collect();
        items.sort_unstable_by_key(|(name, _)| *name);
        items
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_object_parameters(input: &ToolInput) -> Result<()> {
    if input.parameters.is_object() || input.parameters.is_null() {
        Ok(())
    } else {
        Err(OrchestrationError::InvalidToolInput(
            "tool_input must be a JSON object".to_string(),
        ))
    }
}

/// Optional string parameter; present-but-not-a-string is an input error.
fn optional_str<'a>(input: &'a ToolInput, key: &str) -> Result<Option<&'a str>> {
    match input.parameters.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(OrchestrationError::InvalidToolInput(format!(
            "'{}' must be a string",
            key
        ))),
    }
}

/// Document payload for the analysis tools. Anything that is not a
/// non-empty string is treated as "no data" rather than an input error.
fn document_data(input: &ToolInput) -> Option<&str> {
    input
        .parameters
        .get("financial_document_data")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn report_output(report: AnalysisReport) -> Result<ToolOutput> {
    let success = report.is_success();
    let error = if success {
        None
    } else {
        Some(report.message.clone())
    };

    Ok(ToolOutput {
        success,
        data: serde_json::to_value(&report)?,
        error,
    })
}

const NO_DOCUMENT_DATA: &str = "No valid document data provided";

//
// ================= Document Reader =================
//

/// Reads a PDF into the page-marked text observation.
pub struct ReadFinancialDocumentTool {
    loader: DocumentLoader,
    default_path: String,
}

impl ReadFinancialDocumentTool {
    pub fn new(loader: DocumentLoader, default_path: impl Into<String>) -> Self {
        Self {
            loader,
            default_path: default_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl Tool for ReadFinancialDocumentTool {
    fn name(&self) -> &'static str {
        "read_financial_document"
    }

    fn description(&self) -> &'static str {
        "Read a PDF financial document from a path and return its full text with page markers"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        ensure_object_parameters(input)?;
        let path = optional_str(input, "path")?
            .map(str::to_string)
            .unwrap_or_else(|| self.default_path.clone());

        debug!(path = %path, "Reading financial document");

        let loader = self.loader.clone();
        let result = tokio::task::spawn_blocking(move || loader.load(path))
            .await
            .map_err(|e| OrchestrationError::ToolError(format!("Document reader aborted: {}", e)))?;

        let output = match result {
            Ok(document) => ToolOutput {
                success: true,
                data: Value::String(document.text),
                error: None,
            },
            Err(e) => ToolOutput {
                success: false,
                data: Value::String(e.to_string()),
                error: Some(e.kind().to_string()),
            },
        };

        Ok(output)
    }
}

//
// ================= Analysis Stubs =================
//

/// Placeholder investment analysis: normalizes spacing and reports length.
pub struct InvestmentAnalysisTool;

impl InvestmentAnalysisTool {
    pub fn analyze(data: Option<&str>) -> AnalysisReport {
        match data {
            Some(data) if !data.is_empty() => {
                let processed = collapse_spaces(data);
                AnalysisReport {
                    status: AnalysisStatus::Success,
                    processed_length: Some(processed.chars().count()),
                    data_length: None,
                    message: "Investment data processed successfully".to_string(),
                }
            }
            _ => AnalysisReport::error(NO_DOCUMENT_DATA),
        }
    }
}

#[async_trait::async_trait]
impl Tool for InvestmentAnalysisTool {
    fn name(&self) -> &'static str {
        "analyze_investment"
    }

    fn description(&self) -> &'static str {
        "Analyze investment opportunities from financial document data"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        ensure_object_parameters(input)?;
        report_output(Self::analyze(document_data(input)))
    }
}

/// Placeholder risk assessment: reports the size of the input.
pub struct RiskAssessmentTool;

impl RiskAssessmentTool {
    pub fn assess(data: Option<&str>) -> AnalysisReport {
        match data {
            Some(data) if !data.is_empty() => AnalysisReport {
                status: AnalysisStatus::Success,
                processed_length: None,
                data_length: Some(data.chars().count()),
                message: "Risk assessment framework initialized".to_string(),
            },
            _ => AnalysisReport::error(NO_DOCUMENT_DATA),
        }
    }
}

#[async_trait::async_trait]
impl Tool for RiskAssessmentTool {
    fn name(&self) -> &'static str {
        "create_risk_assessment"
    }

    fn description(&self) -> &'static str {
        "Create a risk assessment from financial document data"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        ensure_object_parameters(input)?;
        report_output(Self::assess(document_data(input)))
    }
}

/// Create a registry with the document reader and the analysis tools.
pub fn create_default_registry(settings: &Settings) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(ReadFinancialDocumentTool::new(
        DocumentLoader::new(),
        settings.document_path.clone(),
    )));
    registry.register(Arc::new(InvestmentAnalysisTool));
    registry.register(Arc::new(RiskAssessmentTool));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_error_message;
    use serde_json::json;

    fn tool_input(tool_name: &str, parameters: Value) -> ToolInput {
        ToolInput {
            tool_name: tool_name.to_string(),
            parameters,
        }
    }

    fn reader() -> ReadFinancialDocumentTool {
        ReadFinancialDocumentTool::new(DocumentLoader::new(), "data/sample.pdf")
    }

    #[test]
    fn test_default_registry_lists_tools() {
        let registry = create_default_registry(&Settings::default());
        assert_eq!(
            registry.list(),
            vec![
                "analyze_investment",
                "create_risk_assessment",
                "read_financial_document"
            ]
        );
        assert!(registry.get("web_search").is_none());
    }

    #[tokio::test]
    async fn test_reader_uses_default_path() {
        let output = reader()
            .execute(&tool_input("read_financial_document", json!({})))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.error.as_deref(), Some("file_not_found"));
        assert_eq!(
            output.data,
            json!("Error: File 'data/sample.pdf' not found. Please upload a PDF file.")
        );
    }

    #[tokio::test]
    async fn test_reader_accepts_null_parameters() {
        let output = reader()
            .execute(&tool_input("read_financial_document", Value::Null))
            .await
            .unwrap();

        assert!(is_error_message(output.data.as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_reader_rejects_non_string_path() {
        let result = reader()
            .execute(&tool_input("read_financial_document", json!({"path": 42})))
            .await;

        assert!(matches!(result, Err(OrchestrationError::InvalidToolInput(_))));
    }

    #[cfg(feature = "pdf")]
    #[tokio::test]
    async fn test_reader_returns_document_text() {
        use crate::document::pdf::fixtures::build_pdf;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&build_pdf(&["Revenue", "Expenses"])).unwrap();

        let output = reader()
            .execute(&tool_input(
                "read_financial_document",
                json!({"path": file.path().to_string_lossy()}),
            ))
            .await
            .unwrap();

        assert!(output.success);
        let text = output.data.as_str().unwrap();
        assert!(text.starts_with("[PDF Document - 2 pages]"));
        assert!(text.contains("Revenue"));
        assert!(text.contains("Expenses"));
    }

    #[test]
    fn test_investment_collapses_spaces_before_measuring() {
        let report = InvestmentAnalysisTool::analyze(Some("net  income    rose"));
        assert!(report.is_success());
        assert_eq!(report.processed_length, Some("net income rose".len()));
    }

    #[test]
    fn test_investment_counts_characters_not_bytes() {
        let report = InvestmentAnalysisTool::analyze(Some("€ 1"));
        assert_eq!(report.processed_length, Some(3));
    }

    #[test]
    fn test_risk_reports_data_length() {
        let report = RiskAssessmentTool::assess(Some("a  b"));
        assert!(report.is_success());
        assert_eq!(report.data_length, Some(4));
        assert_eq!(report.message, "Risk assessment framework initialized");
    }

    #[test]
    fn test_analysis_without_data() {
        for report in [
            InvestmentAnalysisTool::analyze(None),
            InvestmentAnalysisTool::analyze(Some("")),
            RiskAssessmentTool::assess(None),
        ] {
            assert_eq!(report.status, AnalysisStatus::Error);
            assert_eq!(report.message, "No valid document data provided");
        }
    }

    #[tokio::test]
    async fn test_analysis_tool_output_shape() {
        let output = InvestmentAnalysisTool
            .execute(&tool_input(
                "analyze_investment",
                json!({"financial_document_data": 17}),
            ))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.data["status"], "error");
        assert_eq!(output.error.as_deref(), Some("No valid document data provided"));

        let output = RiskAssessmentTool
            .execute(&tool_input(
                "create_risk_assessment",
                json!({"financial_document_data": "Q3 report"}),
            ))
            .await
            .unwrap();

        assert!(output.success);
        assert_eq!(output.data["data_length"], 9);
        assert_eq!(output.data["status"], "success");
    }
}
