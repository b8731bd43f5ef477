// ABOUTME: SandboxEngine - executes one skill invocation at a time, racing
// ABOUTME: the skill's evaluation against a uniform wall-clock deadline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Capabilities, NodeLoader, SkillLoader};
use crate::error::SandboxError;

/// Phase of a single sandbox invocation, used for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationPhase {
    Pending,
    Compiling,
    Running,
    Completed,
    TimedOut,
    Failed,
}

/// Runs skill source inside the sandbox with a hard timeout.
///
/// Each `execute` call is independent: the engine holds no per-skill
/// state, and skills must not assume any state survives between calls.
pub struct SandboxEngine {
    loader: Arc<dyn SkillLoader>,
    caps: Capabilities,
    timeout: Duration,
}

impl SandboxEngine {
    /// Create an engine over an explicit loader.
    pub fn new(loader: Arc<dyn SkillLoader>, caps: Capabilities, timeout: Duration) -> Self {
        Self {
            loader,
            caps,
            timeout,
        }
    }

    /// Create an engine backed by the default node loader.
    pub fn node(binary: impl Into<String>, caps: Capabilities, timeout: Duration) -> Self {
        Self::new(Arc::new(NodeLoader::with_binary(binary)), caps, timeout)
    }

    /// The uniform per-invocation deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Compile and run a skill's entry function with the given arguments.
    ///
    /// Compile failures surface before the deadline starts counting.
    /// If the deadline elapses first, the invocation is abandoned
    /// (`kill_on_drop` reaps the loser) and reported as a timeout,
    /// distinct from a runtime failure. Non-string results are
    /// serialized to JSON text.
    pub async fn execute(
        &self,
        source: &str,
        args: &serde_json::Value,
    ) -> Result<String, SandboxError> {
        tracing::debug!(phase = ?InvocationPhase::Compiling, "compiling skill");
        let skill = self.loader.compile(source).map_err(|e| {
            tracing::debug!(phase = ?InvocationPhase::Failed, error = %e, "skill failed to compile");
            e
        })?;

        tracing::debug!(phase = ?InvocationPhase::Running, timeout_ms = self.timeout.as_millis() as u64, "running skill");
        let started = Instant::now();
        let value = match tokio::time::timeout(self.timeout, skill.invoke(args, &self.caps)).await
        {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::debug!(phase = ?InvocationPhase::Failed, error = %e, "skill failed");
                return Err(e);
            }
            Err(_) => {
                tracing::debug!(phase = ?InvocationPhase::TimedOut, "skill timed out");
                return Err(SandboxError::Timeout(self.timeout.as_millis() as u64));
            }
        };

        tracing::debug!(
            phase = ?InvocationPhase::Completed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "skill completed"
        );
        match value {
            serde_json::Value::String(text) => Ok(text),
            other => serde_json::to_string_pretty(&other)
                .map_err(|e| SandboxError::Serialize(e.to_string())),
        }
    }
}
