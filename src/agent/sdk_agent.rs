use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::interface::{AgentError, AgentInterface};
use crate::agent_runtime::{
    AgentRuntimeClient, BlockchainSpec, ChatRequest, LlmSpec, PersonalitySpec, ToolResult,
    ToolSpec,
};
use crate::config::Config;
use crate::tools::Tool;

/// Upper bound on tool round trips within one interaction. The runtime
/// decides whether a tool runs at all; this only stops a directive loop
/// from cycling forever.
const MAX_TOOL_ROUNDS: usize = 4;

/// Production agent: the runtime client plus the configuration and tools
/// registered with it at startup. Immutable after construction, so one
/// instance is shared across all in-flight requests.
pub struct SdkAgent {
    runtime: Arc<AgentRuntimeClient>,
    session_id: String,
    llm: LlmSpec,
    blockchain: BlockchainSpec,
    personality: PersonalitySpec,
    bot_token: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
}

impl SdkAgent {
    pub fn new(
        config: &Config,
        runtime: Arc<AgentRuntimeClient>,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Self {
        info!(
            provider = %config.llm.provider,
            model = %config.llm.model,
            chain_id = %config.blockchain.chain_id,
            tools = tools.len(),
            "Initialized agent"
        );
        Self {
            runtime,
            session_id: Uuid::new_v4().to_string(),
            llm: LlmSpec::from_config(&config.llm, &config.credentials),
            blockchain: BlockchainSpec::from_config(&config.blockchain, &config.credentials),
            personality: PersonalitySpec::from_config(&config.personality),
            bot_token: config.credentials.bot_token.clone(),
            tools,
        }
    }

    fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec()).collect()
    }

    fn chat_request(&self, prompt: &str, tool_result: Option<ToolResult>) -> ChatRequest {
        ChatRequest {
            session_id: self.session_id.clone(),
            prompt: prompt.to_string(),
            llm: self.llm.clone(),
            blockchain: self.blockchain.clone(),
            personality: self.personality.clone(),
            tools: self.tool_specs(),
            tool_result,
            bot_token: self.bot_token.clone(),
        }
    }
}

#[async_trait]
impl AgentInterface for SdkAgent {
    async fn interact(&self, prompt: &str) -> Result<String, AgentError> {
        let mut tool_result = None;

        for _ in 0..MAX_TOOL_ROUNDS {
            let request = self.chat_request(prompt, tool_result.take());
            let response = self
                .runtime
                .chat(&request)
                .await
                .map_err(|err| AgentError::Runtime(err.to_string()))?;

            if let Some(call) = response.tool_call {
                let tool = self
                    .find_tool(&call.name)
                    .ok_or_else(|| AgentError::UnknownTool(call.name.clone()))?;
                debug!(tool = %call.name, call_id = %call.call_id, "executing tool requested by runtime");
                let output = tool.call(&call.arguments);
                tool_result = Some(ToolResult {
                    call_id: call.call_id,
                    name: call.name,
                    output,
                });
                continue;
            }

            if !response.success {
                let reason = response
                    .error
                    .unwrap_or_else(|| "runtime reported failure without a reason".to_string());
                return Err(AgentError::Rejected(reason));
            }

            return Ok(response.text);
        }

        Err(AgentError::ToolLoop(MAX_TOOL_ROUNDS))
    }
}
