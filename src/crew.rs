//! Crew configuration
//!
//! The agent roles are plain immutable records. The external multi-agent
//! runtime owns delegation, memory and task sequencing; this module only
//! describes who the agents are and which tools they may call.

use crate::config::{LlmProvider, SearchToolConfig, Settings};
use crate::error::OrchestrationError;
use crate::tools::ToolRegistry;
use crate::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;

/// Placeholder substituted by [`AgentConfig::goal_for`].
pub const QUERY_PLACEHOLDER: &str = "{query}";

const READ_DOCUMENT_TOOL: &str = "read_financial_document";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    pub role: String,
    /// Goal template containing `{query}`
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<String>,
    pub max_iter: u32,
    pub max_rpm: u32,
    pub verbose: bool,
    pub memory: bool,
    pub allow_delegation: bool,
}

impl AgentConfig {
    /// Goal with the user's query filled in
    pub fn goal_for(&self, query: &str) -> String {
        self.goal.replace(QUERY_PLACEHOLDER, query)
    }
}

pub fn financial_analyst() -> AgentConfig {
    AgentConfig {
        role: "Senior Financial Analyst".to_string(),
        goal: "Analyze financial documents and provide data-driven insights for {query}".to_string(),
        backstory: concat!(
            "You are a professional financial analyst with expertise in corporate finance, ",
            "market analysis, and investment strategies. You provide sound financial advice ",
            "based on careful analysis of financial statements and market data. ",
            "You adhere to financial best practices and maintain regulatory compliance. ",
            "Your recommendations are always backed by thorough research and legitimate analysis."
        )
        .to_string(),
        tools: vec![READ_DOCUMENT_TOOL.to_string()],
        max_iter: 2,
        max_rpm: 10,
        verbose: true,
        memory: true,
        allow_delegation: true,
    }
}

pub fn document_verifier() -> AgentConfig {
    AgentConfig {
        role: "Financial Document Verifier".to_string(),
        goal: "Verify that uploaded documents are legitimate financial documents and assess their validity for {query}".to_string(),
        backstory: concat!(
            "You are a compliance officer with experience in financial document validation. ",
            "You carefully review documents to ensure they are legitimate financial reports. ",
            "You maintain high standards for accuracy and regulatory compliance. ",
            "You provide clear feedback on document authenticity and financial relevance."
        )
        .to_string(),
        tools: vec![READ_DOCUMENT_TOOL.to_string()],
        max_iter: 2,
        max_rpm: 5,
        verbose: true,
        memory: true,
        allow_delegation: true,
    }
}

pub fn investment_advisor() -> AgentConfig {
    AgentConfig {
        role: "Investment Advisor".to_string(),
        goal: "Provide evidence-based investment recommendations based on financial analysis of {query}".to_string(),
        backstory: concat!(
            "You are a certified investment advisor with a track record of providing sound recommendations. ",
            "You analyze financial data carefully and provide recommendations aligned with client goals. ",
            "You understand risk management, portfolio diversification, and market fundamentals. ",
            "You always disclose relevant risks and follow fiduciary principles."
        )
        .to_string(),
        tools: vec![READ_DOCUMENT_TOOL.to_string()],
        max_iter: 2,
        max_rpm: 10,
        verbose: true,
        memory: false,
        allow_delegation: false,
    }
}

pub fn risk_assessor() -> AgentConfig {
    AgentConfig {
        role: "Risk Assessment Specialist".to_string(),
        goal: "Conduct thorough risk assessments based on financial documents for {query}".to_string(),
        backstory: concat!(
            "You are a risk management expert with deep knowledge of financial markets and risk models. ",
            "You conduct comprehensive risk assessments using established financial frameworks. ",
            "You understand market dynamics, regulatory requirements, and portfolio risk metrics. ",
            "Your assessments are practical, evidence-based, and aligned with industry standards."
        )
        .to_string(),
        tools: vec![READ_DOCUMENT_TOOL.to_string()],
        max_iter: 2,
        max_rpm: 10,
        verbose: true,
        memory: false,
        allow_delegation: false,
    }
}

/// Analyst, verifier, advisor, risk assessor, in that order.
pub fn default_crew() -> Vec<AgentConfig> {
    vec![
        financial_analyst(),
        document_verifier(),
        investment_advisor(),
        risk_assessor(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

/// Everything the external runtime needs to instantiate the crew.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewManifest {
    pub agents: Vec<AgentConfig>,
    pub tools: Vec<ToolDescriptor>,
    pub llm_provider: Option<LlmProvider>,
    pub search: SearchToolConfig,
    pub document_path: String,
}

impl CrewManifest {
    pub fn new(agents: Vec<AgentConfig>, registry: &ToolRegistry, settings: &Settings) -> Result<Self> {
        let tools = registry
            .describe()
            .into_iter()
            .map(|(name, description)| ToolDescriptor {
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect();

        let manifest = Self {
            agents,
            tools,
            llm_provider: settings.llm_provider,
            search: settings.search.clone(),
            document_path: settings.document_path.clone(),
        };

        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject agents with unknown tools, zero limits or goals without a
    /// query slot.
    pub fn validate(&self) -> Result<()> {
        for agent in &self.agents {
            if let Some(tool) = agent
                .tools
                .iter()
                .find(|t| !self.tools.iter().any(|d| &d.name == *t))
            {
                return Err(OrchestrationError::ConfigError(format!(
                    "Agent '{}' references unregistered tool '{}'",
                    agent.role, tool
                )));
            }

            if agent.max_iter == 0 || agent.max_rpm == 0 {
                return Err(OrchestrationError::ConfigError(format!(
                    "Agent '{}' must allow at least one iteration and one request per minute",
                    agent.role
                )));
            }

            if !agent.goal.contains(QUERY_PLACEHOLDER) {
                return Err(OrchestrationError::ConfigError(format!(
                    "Agent '{}' goal has no {} placeholder",
                    agent.role, QUERY_PLACEHOLDER
                )));
            }
        }

        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// SHA256 of the manifest's JSON form, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        if serde_json::to_writer(&mut HashWriter(&mut hasher), self).is_err() {
            return String::new();
        }

        hex::encode(hasher.finalize())
    }
}

/// Adapter to allow writing into Sha256 via std::io::Write
struct HashWriter<'a, H: Digest>(&'a mut H);

impl<'a, H: Digest> Write for HashWriter<'a, H> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
