// ABOUTME: Defines the ApprovalHandler trait for async operator approval.
// ABOUTME: Called when risk classification marks an invocation high-risk.

use async_trait::async_trait;

/// Context provided to approval handlers.
#[derive(Debug, Clone)]
pub struct ApprovalContext {
    /// Description of the tool being executed.
    pub tool_description: String,

    /// Unique identifier for this approval request.
    pub request_id: String,
}

impl ApprovalContext {
    /// Create a context with a fresh request id.
    pub fn new(tool_description: impl Into<String>) -> Self {
        Self {
            tool_description: tool_description.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Trait for handling approval requests.
///
/// This is a true suspension point: the base contract has no timeout,
/// and the host will not run the tool's handler until this resolves.
/// Callers needing a bounded wait must impose their own timeout around
/// the gate.
#[async_trait]
pub trait ApprovalHandler: Send + Sync {
    /// Request approval for a tool invocation.
    ///
    /// Returns `Ok(true)` if approved, `Ok(false)` if denied.
    async fn request_approval(
        &self,
        tool: &str,
        params: &serde_json::Value,
        context: &ApprovalContext,
    ) -> Result<bool, anyhow::Error>;
}

/// An approval handler that always approves.
pub struct AlwaysApprove;

#[async_trait]
impl ApprovalHandler for AlwaysApprove {
    async fn request_approval(
        &self,
        _tool: &str,
        _params: &serde_json::Value,
        _context: &ApprovalContext,
    ) -> Result<bool, anyhow::Error> {
        Ok(true)
    }
}

/// An approval handler that always denies.
pub struct AlwaysDeny;

#[async_trait]
impl ApprovalHandler for AlwaysDeny {
    async fn request_approval(
        &self,
        _tool: &str,
        _params: &serde_json::Value,
        _context: &ApprovalContext,
    ) -> Result<bool, anyhow::Error> {
        Ok(false)
    }
}
