use std::sync::Arc;

use crate::agent::{AgentInterface, SdkAgent};
use crate::agent_runtime::AgentRuntimeClient;
use crate::config::Config;
use crate::tools::csv_analysis::CsvAnalysisTool;
use crate::tools::Tool;

/// Shared application state. The agent is constructed once here and
/// injected into every handler; it is immutable after construction and
/// safe to share across in-flight requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub runtime: Arc<AgentRuntimeClient>,
    pub agent: Arc<dyn AgentInterface>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let runtime = Arc::new(AgentRuntimeClient::new(
            config.credentials.agent_base_url.clone(),
        ));

        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(CsvAnalysisTool)];
        let agent = Arc::new(SdkAgent::new(&config, runtime.clone(), tools));

        Self {
            config,
            runtime,
            agent,
        }
    }
}
