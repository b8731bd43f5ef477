// ABOUTME: BashTool - executes shell commands. High-risk: always requires
// ABOUTME: approval, and the command is guarded by the denylist validator.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;

use crate::tool::{ArgGuard, GuardKind, Tool, ToolResult};

/// Tool for executing shell commands.
/// Uses `bash -c` on Unix and `cmd.exe /C` on Windows.
pub struct BashTool;

const GUARDS: &[ArgGuard] = &[
    ArgGuard {
        field: "command",
        kind: GuardKind::Command,
    },
    ArgGuard {
        field: "working_dir",
        kind: GuardKind::Path,
    },
];

#[async_trait]
impl Tool for BashTool {
    fn name(&self) -> &str {
        "bash"
    }

    fn description(&self) -> &str {
        "Execute a shell command and return its output. Use for running tests, git commands, etc."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                },
                "working_dir": {
                    "type": "string",
                    "description": "The working directory for the command (default: project root)"
                }
            },
            "required": ["command"]
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
            command: String,
            working_dir: Option<String>,
        }
        let params: Params = serde_json::from_value(params)?;

        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = tokio::process::Command::new("cmd.exe");
            c.arg("/C").arg(&params.command);
            c
        } else {
            let mut c = tokio::process::Command::new("bash");
            c.arg("-c").arg(&params.command);
            c
        };
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(dir) = params.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let result = if output.status.success() {
            if stderr.is_empty() {
                stdout.to_string()
            } else {
                format!("{}\n\nstderr:\n{}", stdout, stderr)
            }
        } else {
            format!(
                "Command failed with exit code {}\n\nstdout:\n{}\n\nstderr:\n{}",
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )
        };

        if output.status.success() {
            Ok(ToolResult::text(result))
        } else {
            Ok(ToolResult::error(result))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bash_echo() {
        let tool = BashTool;
        let result = tool
            .execute(serde_json::json!({
                "command": "echo Hello, world!"
            }))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("Hello, world!"));
    }

    #[tokio::test]
    async fn test_bash_failing_command() {
        let tool = BashTool;
        let result = tool
            .execute(serde_json::json!({
                "command": "exit 1"
            }))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("exit code 1"));
    }

    #[test]
    fn test_always_requires_approval() {
        assert!(BashTool.requires_approval(&serde_json::json!({"command": "ls"})));
    }
}
