pub mod interface;
pub mod retry;
pub mod sdk_agent;

pub use interface::{AgentError, AgentInterface};
pub use sdk_agent::SdkAgent;
