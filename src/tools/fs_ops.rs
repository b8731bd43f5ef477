// ABOUTME: FsTool - generic filesystem operations (read/list/stat/delete).
// ABOUTME: Delete-flavored invocations are caught by the risk classifier.

use async_trait::async_trait;
use serde::Deserialize;

use crate::tool::{ArgGuard, GuardKind, Tool, ToolResult};

/// Generic filesystem tool with a single `operation` selector.
pub struct FsTool;

const GUARDS: &[ArgGuard] = &[ArgGuard {
    field: "path",
    kind: GuardKind::Path,
}];

#[async_trait]
impl Tool for FsTool {
    fn name(&self) -> &str {
        "fs"
    }

    fn description(&self) -> &str {
        "Filesystem operations inside the project: read, list, stat, or delete a path."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["read", "list", "stat", "delete"],
                    "description": "The operation to perform"
                },
                "path": {
                    "type": "string",
                    "description": "The target path, relative to the project root"
                }
            },
            "required": ["operation", "path"]
        })
    }

    fn guards(&self) -> &[ArgGuard] {
        GUARDS
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            operation: String,
            path: String,
        }
        let params: Params = serde_json::from_value(params)?;
        let path = std::path::Path::new(&params.path);

        match params.operation.as_str() {
            "read" => match std::fs::read_to_string(path) {
                Ok(content) => Ok(ToolResult::text(content)),
                Err(e) => Ok(ToolResult::error(format!("Failed to read: {}", e))),
            },
            "list" => match std::fs::read_dir(path) {
                Ok(entries) => {
                    let mut names: Vec<String> = entries
                        .filter_map(Result::ok)
                        .map(|e| e.file_name().to_string_lossy().into_owned())
                        .collect();
                    names.sort();
                    Ok(ToolResult::text(names.join("\n")))
                }
                Err(e) => Ok(ToolResult::error(format!("Failed to list: {}", e))),
            },
            "stat" => match std::fs::metadata(path) {
                Ok(meta) => Ok(ToolResult::json(&serde_json::json!({
                    "size": meta.len(),
                    "is_file": meta.is_file(),
                    "is_dir": meta.is_dir(),
                    "readonly": meta.permissions().readonly(),
                }))),
                Err(e) => Ok(ToolResult::error(format!("Failed to stat: {}", e))),
            },
            "delete" => {
                let outcome = if path.is_dir() {
                    std::fs::remove_dir_all(path)
                } else {
                    std::fs::remove_file(path)
                };
                match outcome {
                    Ok(()) => Ok(ToolResult::text(format!("Deleted {}", params.path))),
                    Err(e) => Ok(ToolResult::error(format!("Failed to delete: {}", e))),
                }
            }
            other => Ok(ToolResult::error(format!(
                "Unknown operation '{}', expected read/list/stat/delete",
                other
            ))),
        }
    }
}
