// ABOUTME: WriteFileTool - writes content to a file. High-risk: always
// ABOUTME: requires approval. Creates parent directories, overwrites.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::tool::{ArgGuard, GuardKind, Tool, ToolResult};

/// Tool for writing content to files.
pub struct WriteFileTool;

const GUARDS: &[ArgGuard] = &[ArgGuard {
    field: "path",
    kind: GuardKind::Path,
}];

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file inside the project. Creates the file if it doesn't exist, overwrites if it does."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path to the file to write, relative to the project root"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["path", "content"]
        })
    }

    fn requires_approval(&self, _params: &serde_json::Value) -> bool {
        true
    }

    fn guards(&self) -> &[ArgGuard] {
        GUARDS
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            path: String,
            content: String,
        }
        let params: Params = serde_json::from_value(params)?;

        if let Some(parent) = Path::new(&params.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        match std::fs::write(&params.path, &params.content) {
            Ok(()) => Ok(ToolResult::text(format!(
                "Successfully wrote {} bytes to {}",
                params.content.len(),
                params.path
            ))),
            Err(e) => Ok(ToolResult::error(format!("Failed to write file: {}", e))),
        }
    }
}
