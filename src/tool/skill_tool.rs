// ABOUTME: SkillTool - adapts a discovered skill into the Tool interface,
// ABOUTME: running its source through the sandbox engine on execute.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Tool, ToolResult, ToolSource};
use crate::catalog::{self, SkillRecord};
use crate::error::SandboxError;
use crate::sandbox::SandboxEngine;

/// A catalog skill exposed as a dispatchable tool.
pub struct SkillTool {
    name: String,
    description: String,
    args_schema: serde_json::Value,
    source: String,
    engine: Arc<SandboxEngine>,
}

impl SkillTool {
    /// Wrap a discovered skill record.
    ///
    /// The name is re-normalized: records read back from disk may have
    /// been edited by hand.
    pub fn new(record: SkillRecord, engine: Arc<SandboxEngine>) -> Self {
        let args_schema = if record.meta.args_schema.is_object() {
            record.meta.args_schema
        } else {
            serde_json::json!({ "type": "object" })
        };
        Self {
            name: catalog::normalize_name(&record.meta.name),
            description: record.meta.description,
            args_schema,
            source: record.source,
            engine,
        }
    }
}

#[async_trait]
impl Tool for SkillTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> serde_json::Value {
        self.args_schema.clone()
    }

    fn source(&self) -> ToolSource {
        ToolSource::Skill
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        match self.engine.execute(&self.source, &params).await {
            Ok(output) => Ok(ToolResult::text(output)),
            // Skill-level failures are results the planning loop can act
            // on; only infrastructure failures propagate as errors.
            Err(
                e @ (SandboxError::Compile(_)
                | SandboxError::Runtime(_)
                | SandboxError::Timeout(_)
                | SandboxError::Serialize(_)),
            ) => Ok(ToolResult::error(e.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
