use tracing::warn;

use super::interface::{AgentError, AgentInterface};

/// Attempts per prompt before the interaction counts as failed.
pub const RETRY_ATTEMPTS: u32 = 5;

/// Invoke the agent until it yields a non-empty reply, up to `attempts`
/// tries with no delay between them. Errors and empty replies both burn
/// an attempt; exhaustion of either kind is `AgentError::Exhausted`.
pub async fn interact_with_retries(
    agent: &dyn AgentInterface,
    prompt: &str,
    attempts: u32,
) -> Result<String, AgentError> {
    for attempt in 1..=attempts {
        match agent.interact(prompt).await {
            Ok(reply) if !reply.trim().is_empty() => return Ok(reply),
            Ok(_) => {
                warn!(attempt, attempts, "agent returned an empty reply");
            }
            Err(err) => {
                warn!(attempt, attempts, error = %err, "agent interaction failed");
            }
        }
    }

    Err(AgentError::Exhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    enum Step {
        Reply(&'static str),
        Empty,
        Fail,
    }

    struct ScriptedAgent {
        script: Mutex<Vec<Step>>,
        calls: AtomicU32,
    }

    impl ScriptedAgent {
        fn new(script: Vec<Step>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AgentInterface for ScriptedAgent {
        async fn interact(&self, _prompt: &str) -> Result<String, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            match script.remove(0) {
                Step::Reply(text) => Ok(text.to_string()),
                Step::Empty => Ok(String::new()),
                Step::Fail => Err(AgentError::Runtime("boom".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn first_success_returns_immediately() {
        let agent = ScriptedAgent::new(vec![Step::Reply("hello")]);
        let reply = interact_with_retries(&agent, "hi", RETRY_ATTEMPTS).await.unwrap();
        assert_eq!(reply, "hello");
        assert_eq!(agent.calls(), 1);
    }

    #[tokio::test]
    async fn retries_until_success_on_attempt_k() {
        let agent = ScriptedAgent::new(vec![Step::Fail, Step::Empty, Step::Reply("finally")]);
        let reply = interact_with_retries(&agent, "hi", RETRY_ATTEMPTS).await.unwrap();
        assert_eq!(reply, "finally");
        assert_eq!(agent.calls(), 3);
    }

    #[tokio::test]
    async fn all_failures_exhaust_after_five_attempts() {
        let agent = ScriptedAgent::new(vec![
            Step::Fail,
            Step::Fail,
            Step::Fail,
            Step::Fail,
            Step::Fail,
        ]);
        let err = interact_with_retries(&agent, "hi", RETRY_ATTEMPTS).await.unwrap_err();
        assert!(matches!(err, AgentError::Exhausted { attempts: 5 }));
        assert_eq!(agent.calls(), 5);
    }

    #[tokio::test]
    async fn persistent_empty_replies_also_exhaust() {
        let agent = ScriptedAgent::new(vec![
            Step::Empty,
            Step::Empty,
            Step::Empty,
            Step::Empty,
            Step::Empty,
        ]);
        let err = interact_with_retries(&agent, "hi", RETRY_ATTEMPTS).await.unwrap_err();
        assert!(matches!(err, AgentError::Exhausted { attempts: 5 }));
        assert_eq!(agent.calls(), 5);
    }

    #[tokio::test]
    async fn whitespace_only_reply_counts_as_empty() {
        let agent = ScriptedAgent::new(vec![Step::Reply("   \n"), Step::Reply("real answer")]);
        let reply = interact_with_retries(&agent, "hi", RETRY_ATTEMPTS).await.unwrap();
        assert_eq!(reply, "real answer");
        assert_eq!(agent.calls(), 2);
    }
}
