//! Tool invocation
//!
//! The runtime calls tools one at a time by name. Each call is a single
//! attempt and always yields an `Observation`, never an error.

use crate::models::{ExecutionStatus, Observation, ToolInput};
use crate::tools::ToolRegistry;
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs registered tools and records what happened
pub struct ToolExecutor {
    tool_registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(tool_registry: ToolRegistry) -> Self {
        Self { tool_registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    pub async fn invoke(&self, tool_name: &str, parameters: Value) -> Observation {
        debug!(tool_name = %tool_name, "Invoking tool");

        let start = Instant::now();

        let tool_input = ToolInput {
            tool_name: tool_name.to_string(),
            parameters: parameters.clone(),
        };

        let status;
        let tool_output;

        match self.tool_registry.get(tool_name) {
            Some(tool) => match tool.execute(&tool_input).await {
                Ok(output) => {
                    status = if output.success {
                        ExecutionStatus::Success
                    } else {
                        ExecutionStatus::Failed
                    };

                    if let Some(error) = &output.error {
                        warn!(tool_name = %tool_name, error = %error, "Tool reported failure");
                    }

                    tool_output = output.data;
                }
                Err(e) => {
                    status = ExecutionStatus::Failed;
                    tool_output = serde_json::json!({
                        "error": e.to_string()
                    });

                    warn!(
                        tool_name = %tool_name,
                        error = %e,
                        "Tool execution failed"
                    );
                }
            },
            None => {
                status = ExecutionStatus::Skipped;
                tool_output = serde_json::json!({
                    "error": "Tool not registered"
                });

                warn!(tool_name = %tool_name, "Tool not registered");
            }
        }

        let execution_time_ms = start.elapsed().as_millis() as u64;

        info!(
            tool_name = %tool_name,
            status = %status,
            execution_time_ms,
            "Tool invocation complete"
        );

        Observation {
            observation_id: Uuid::new_v4(),
            tool_name: tool_name.to_string(),
            tool_input: parameters,
            tool_output,
            execution_time_ms,
            created_at: Utc::now(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::tools::create_default_registry;
    use serde_json::json;

    fn executor() -> ToolExecutor {
        ToolExecutor::new(create_default_registry(&Settings::default()))
    }

    #[test]
    fn test_registry_is_shared_with_caller() {
        let executor = executor();
        assert!(executor.registry().get("read_financial_document").is_some());
        assert_eq!(executor.registry().list().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_skipped() {
        let obs = executor().invoke("web_search", json!({"query": "AAPL"})).await;

        assert_eq!(obs.status, ExecutionStatus::Skipped);
        assert_eq!(obs.tool_output["error"], "Tool not registered");
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let obs = executor()
            .invoke(
                "create_risk_assessment",
                json!({"financial_document_data": "Revenue grew 12%"}),
            )
            .await;

        assert_eq!(obs.status, ExecutionStatus::Success);
        assert_eq!(obs.tool_output["data_length"], 16);
        assert_eq!(obs.tool_input["financial_document_data"], "Revenue grew 12%");
    }

    #[tokio::test]
    async fn test_missing_document_is_failed_with_message() {
        let obs = executor()
            .invoke("read_financial_document", json!({"path": "nowhere/report.pdf"}))
            .await;

        assert_eq!(obs.status, ExecutionStatus::Failed);
        assert_eq!(
            obs.tool_output,
            json!("Error: File 'nowhere/report.pdf' not found. Please upload a PDF file.")
        );
    }

    #[tokio::test]
    async fn test_invalid_input_is_failed() {
        let obs = executor()
            .invoke("read_financial_document", json!(["not", "an", "object"]))
            .await;

        assert_eq!(obs.status, ExecutionStatus::Failed);
        assert!(obs.tool_output["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid tool input"));
    }
}
