pub mod csv_analysis;

use crate::agent_runtime::ToolSpec;

/// A capability registered with the agent. The runtime decides when a tool
/// runs; implementations must convert their own failures into output text
/// rather than erroring past the tool boundary.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments the runtime should supply.
    fn parameters(&self) -> serde_json::Value;

    fn call(&self, arguments: &serde_json::Value) -> String;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}
