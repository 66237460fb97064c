use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{BlockchainConfig, Credentials, LlmConfig, PersonalityConfig};

/// HTTP client for the external agent runtime. The runtime owns the LLM
/// calls, blockchain awareness and tool dispatch decisions; this client
/// only ships configuration and prompts across the wire.
#[derive(Debug, Clone)]
pub struct AgentRuntimeClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSpec {
    pub provider: String,
    pub model: String,
    #[serde(rename = "provider-api-key")]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainSpec {
    #[serde(rename = "chainId")]
    pub chain_id: String,
    #[serde(rename = "explorer-api-key")]
    pub explorer_api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalitySpec {
    pub tone: String,
    pub language: String,
    pub verbosity: String,
}

/// A tool advertised to the runtime. The runtime decides if and when the
/// tool runs; the service only executes it on request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Tool invocation directive returned by the runtime mid-interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub call_id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Output of a locally executed tool, posted back on the follow-up leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: String,
    pub name: String,
    pub output: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub prompt: String,
    pub llm: LlmSpec,
    pub blockchain: BlockchainSpec,
    pub personality: PersonalitySpec,
    pub tools: Vec<ToolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<ToolResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub text: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub tool_call: Option<ToolCall>,
}

impl AgentRuntimeClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/agent/chat", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        let result: ChatResponse = response.json().await?;
        Ok(result)
    }

    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

impl LlmSpec {
    pub fn from_config(config: &LlmConfig, credentials: &Credentials) -> Self {
        Self {
            provider: config.provider.clone(),
            model: config.model.clone(),
            api_key: credentials.llm_api_key.clone(),
        }
    }
}

impl BlockchainSpec {
    pub fn from_config(config: &BlockchainConfig, credentials: &Credentials) -> Self {
        Self {
            chain_id: config.chain_id.clone(),
            explorer_api_key: credentials.explorer_api_key.clone(),
        }
    }
}

impl PersonalitySpec {
    pub fn from_config(config: &PersonalityConfig) -> Self {
        Self {
            tone: config.tone.clone(),
            language: config.language.clone(),
            verbosity: config.verbosity.clone(),
        }
    }
}
