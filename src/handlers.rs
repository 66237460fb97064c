use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::agent::retry::{interact_with_retries, RETRY_ATTEMPTS};
use crate::agent::AgentError;
use crate::state::AppState;

const EMPTY_PROMPT_DETAIL: &str = "The prompt cannot be empty. Please provide a valid input.";
const EXHAUSTED_DETAIL: &str =
    "Agent failed to generate a response after multiple attempts. Please try again.";
const UNEXPECTED_DETAIL: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Interact with the agent using a prompt. Expects a JSON payload with a
/// `prompt` key.
pub async fn llm_endpoint(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if request.prompt.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": EMPTY_PROMPT_DETAIL })),
        ));
    }

    match interact_with_retries(state.agent.as_ref(), &request.prompt, RETRY_ATTEMPTS).await {
        Ok(reply) => {
            info!(chars = reply.len(), "agent produced a response");
            Ok(Json(json!({
                "response": reply,
                "status": "success"
            })))
        }
        Err(AgentError::Exhausted { attempts }) => {
            error!(attempts, "agent exhausted its retry budget");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": EXHAUSTED_DETAIL })),
            ))
        }
        Err(err) => {
            error!(error = %err, "unexpected error during agent interaction");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": UNEXPECTED_DETAIL })),
            ))
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let runtime_healthy = state.runtime.health_check().await.unwrap_or(false);
    Json(json!({
        "status": "ok",
        "agent_runtime": runtime_healthy,
        "chain_id": state.config.blockchain.chain_id
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentInterface;
    use crate::config::{
        BlockchainConfig, Config, Credentials, LlmConfig, PersonalityConfig, SystemConfig,
    };
    use crate::agent_runtime::AgentRuntimeClient;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    enum Behavior {
        Reply(&'static str),
        ReplyAfterFailures(u32, &'static str),
        AlwaysFail,
        AlwaysEmpty,
    }

    struct ScriptedAgent {
        behavior: Behavior,
        calls: AtomicU32,
    }

    impl ScriptedAgent {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AgentInterface for ScriptedAgent {
        async fn interact(&self, _prompt: &str) -> Result<String, AgentError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::ReplyAfterFailures(failures, text) => {
                    if call < failures {
                        Err(AgentError::Runtime("boom".to_string()))
                    } else {
                        Ok(text.to_string())
                    }
                }
                Behavior::AlwaysFail => Err(AgentError::Runtime("boom".to_string())),
                Behavior::AlwaysEmpty => Ok(String::new()),
            }
        }
    }

    fn test_config() -> Config {
        Config {
            system: SystemConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            credentials: Credentials {
                llm_api_key: "llm-key".to_string(),
                explorer_api_key: "explorer-key".to_string(),
                agent_base_url: "http://localhost:9000".to_string(),
                bot_token: None,
            },
            llm: LlmConfig {
                provider: "GoogleGenAI".to_string(),
                model: "gemini-2.0-flash-lite".to_string(),
            },
            blockchain: BlockchainConfig {
                chain_id: "388".to_string(),
            },
            personality: PersonalityConfig {
                tone: "friendly".to_string(),
                language: "English".to_string(),
                verbosity: "high".to_string(),
            },
        }
    }

    fn state_with(agent: Arc<ScriptedAgent>) -> AppState {
        let config = test_config();
        AppState {
            runtime: Arc::new(AgentRuntimeClient::new(
                config.credentials.agent_base_url.clone(),
            )),
            config,
            agent,
        }
    }

    async fn post_prompt(
        state: AppState,
        prompt: &str,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        llm_endpoint(
            State(state),
            Json(PromptRequest {
                prompt: prompt.to_string(),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_invoking_the_agent() {
        for prompt in ["", "   ", "\n\t "] {
            let agent = ScriptedAgent::new(Behavior::Reply("unused"));
            let (status, body) = post_prompt(state_with(agent.clone()), prompt)
                .await
                .unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.0["detail"], EMPTY_PROMPT_DETAIL);
            assert_eq!(agent.calls(), 0);
        }
    }

    #[tokio::test]
    async fn successful_reply_returns_success_envelope() {
        let agent = ScriptedAgent::new(Behavior::Reply("the latest block is 42"));
        let body = post_prompt(state_with(agent.clone()), "what is the latest block?")
            .await
            .unwrap();
        assert_eq!(body.0["response"], "the latest block is 42");
        assert_eq!(body.0["status"], "success");
        assert_eq!(agent.calls(), 1);
    }

    #[tokio::test]
    async fn success_on_third_attempt_invokes_agent_exactly_three_times() {
        let agent = ScriptedAgent::new(Behavior::ReplyAfterFailures(2, "recovered"));
        let body = post_prompt(state_with(agent.clone()), "hello")
            .await
            .unwrap();
        assert_eq!(body.0["response"], "recovered");
        assert_eq!(agent.calls(), 3);
    }

    #[tokio::test]
    async fn five_failing_attempts_yield_exhausted_500() {
        let agent = ScriptedAgent::new(Behavior::AlwaysFail);
        let (status, body) = post_prompt(state_with(agent.clone()), "hello")
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["detail"], EXHAUSTED_DETAIL);
        assert_eq!(agent.calls(), 5);
    }

    #[tokio::test]
    async fn persistent_empty_replies_yield_exhausted_500() {
        let agent = ScriptedAgent::new(Behavior::AlwaysEmpty);
        let (status, body) = post_prompt(state_with(agent.clone()), "hello")
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["detail"], EXHAUSTED_DETAIL);
        assert_eq!(agent.calls(), 5);
    }
}
