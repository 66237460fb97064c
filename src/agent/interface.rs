use async_trait::async_trait;
use thiserror::Error;

/// The narrow seam in front of the external agent. Everything behind it
/// (LLM calls, blockchain awareness, tool dispatch decisions) is opaque.
#[async_trait]
pub trait AgentInterface: Send + Sync {
    /// Send one prompt to the agent and return its reply text.
    async fn interact(&self, prompt: &str) -> Result<String, AgentError>;
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent runtime request failed: {0}")]
    Runtime(String),

    #[error("agent runtime rejected the interaction: {0}")]
    Rejected(String),

    #[error("agent requested unknown tool `{0}`")]
    UnknownTool(String),

    #[error("agent tool loop exceeded {0} rounds")]
    ToolLoop(usize),

    #[error("agent produced no response after {attempts} attempts")]
    Exhausted { attempts: u32 },
}
