//! Environment-driven settings
//!
//! The LLM and web-search credentials are consumed by the external agent
//! runtime. Only their presence is recorded here; secrets never leave the
//! environment.

use crate::document::DEFAULT_DOCUMENT_PATH;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, warn};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const SERPER_API_KEY: &str = "SERPER_API_KEY";
pub const DOCUMENT_PATH_VAR: &str = "FINANCIAL_DOCUMENT_PATH";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Google,
}

impl LlmProvider {
    /// Environment variable the runtime reads the key from
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => OPENAI_API_KEY,
            LlmProvider::Google => GOOGLE_API_KEY,
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LlmProvider::OpenAi => "OpenAI",
            LlmProvider::Google => "Google",
        };
        write!(f, "{}", s)
    }
}

/// External web-search tool (Serper). Described, never called.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchToolConfig {
    pub provider: String,
    pub api_key_var: String,
    pub enabled: bool,
}

impl Default for SearchToolConfig {
    fn default() -> Self {
        Self {
            provider: "serper".to_string(),
            api_key_var: SERPER_API_KEY.to_string(),
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub llm_provider: Option<LlmProvider>,
    pub search: SearchToolConfig,
    pub document_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_provider: None,
            search: SearchToolConfig::default(),
            document_path: DEFAULT_DOCUMENT_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process
    /// environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).map(|v| !v.trim().is_empty()).unwrap_or(false);

        // OpenAI wins when both keys are configured
        let llm_provider = if present(OPENAI_API_KEY) {
            Some(LlmProvider::OpenAi)
        } else if present(GOOGLE_API_KEY) {
            Some(LlmProvider::Google)
        } else {
            None
        };

        match llm_provider {
            Some(provider) => info!(provider = %provider, "LLM provider selected"),
            None => warn!(
                "No API keys found. Ensure {} or {} is set.",
                OPENAI_API_KEY, GOOGLE_API_KEY
            ),
        }

        let search = SearchToolConfig {
            enabled: present(SERPER_API_KEY),
            ..SearchToolConfig::default()
        };

        let document_path = lookup(DOCUMENT_PATH_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_PATH.to_string());

        Self {
            llm_provider,
            search,
            document_path,
        }
    }
}
