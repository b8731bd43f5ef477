// ABOUTME: Defines the Tool trait - the uniform unit of dispatch, with its
// ABOUTME: source tag, risk declaration, and declared argument guards.

use async_trait::async_trait;

use super::ToolResult;

/// Where a tool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSource {
    /// Built-in implementation.
    Core,
    /// Loaded from the skill catalog.
    Skill,
    /// Proxied from an external MCP server.
    Mcp,
}

/// Which validator a declared argument is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    Path,
    Command,
    Pattern,
    Sql,
    Url,
}

/// A security check a tool declares for one of its string arguments.
///
/// The host runs the matching validator before the handler executes.
/// Absent or non-string fields are skipped; a tool that requires the
/// field reports that itself.
#[derive(Debug, Clone, Copy)]
pub struct ArgGuard {
    pub field: &'static str,
    pub kind: GuardKind,
}

/// A tool that can be executed by the agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the planning loop.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Where this tool came from.
    fn source(&self) -> ToolSource {
        ToolSource::Core
    }

    /// Explicit per-tool risk declaration; ORed with the central
    /// classifier in [`crate::security::is_high_risk`].
    fn requires_approval(&self, _params: &serde_json::Value) -> bool {
        false
    }

    /// Arguments this tool will touch, validated before execution.
    fn guards(&self) -> &[ArgGuard] {
        &[]
    }

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}
