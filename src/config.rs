use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Process configuration, assembled from environment variables at startup.
///
/// Required credentials are validated up front so a missing key fails the
/// process immediately instead of surfacing on the first agent call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub system: SystemConfig,
    pub credentials: Credentials,
    pub llm: LlmConfig,
    pub blockchain: BlockchainConfig,
    pub personality: PersonalityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Credentials for the agent runtime and its integrations. `bot_token` is
/// forwarded to the runtime when present but nothing in this service
/// depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub llm_api_key: String,
    pub explorer_api_key: String,
    pub agent_base_url: String,
    pub bot_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

/// Personality plugin settings passed through to the agent runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityConfig {
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_verbosity")]
    pub verbosity: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_llm_provider() -> String {
    "GoogleGenAI".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

fn default_chain_id() -> String {
    "388".to_string()
}

fn default_tone() -> String {
    "friendly".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_verbosity() -> String {
    "high".to_string()
}

const REQUIRED_VARS: [&str; 3] = ["GOOGLE_API_KEY", "EXPLORER_API_KEY", "BASE_URL"];

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port number: {}", raw))?,
            None => default_port(),
        };

        Ok(Self {
            system: SystemConfig {
                host: get("HOST").unwrap_or_else(default_host),
                port,
            },
            credentials: Credentials {
                llm_api_key: get("GOOGLE_API_KEY").unwrap(),
                explorer_api_key: get("EXPLORER_API_KEY").unwrap(),
                agent_base_url: get("BASE_URL").unwrap(),
                bot_token: get("BOT_TOKEN"),
            },
            llm: LlmConfig {
                provider: get("LLM_PROVIDER").unwrap_or_else(default_llm_provider),
                model: get("LLM_MODEL").unwrap_or_else(default_llm_model),
            },
            blockchain: BlockchainConfig {
                chain_id: get("CHAIN_ID").unwrap_or_else(default_chain_id),
            },
            personality: PersonalityConfig {
                tone: get("PERSONALITY_TONE").unwrap_or_else(default_tone),
                language: get("PERSONALITY_LANGUAGE").unwrap_or_else(default_language),
                verbosity: get("PERSONALITY_VERBOSITY").unwrap_or_else(default_verbosity),
            },
        })
    }
}
