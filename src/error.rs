// ABOUTME: Defines all error types for the skillet library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under SkilletError.

/// Top-level error type for the skillet library.
#[derive(Debug, thiserror::Error)]
pub enum SkilletError {
    #[error("Security error: {0}")]
    Security(#[from] SecurityError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Sandbox error: {0}")]
    Sandbox(#[from] SandboxError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// A security block: a validator rejected an input.
///
/// Surfaced verbatim to the caller and never retried automatically.
/// The payload is the human-readable reason.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error("Path blocked: {0}")]
    Path(String),

    #[error("Command blocked: {0}")]
    Command(String),

    #[error("Pattern blocked: {0}")]
    Pattern(String),

    #[error("SQL blocked: {0}")]
    Sql(String),

    #[error("URL blocked: {0}")]
    Url(String),
}

/// Errors from skill catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid skill: {0}")]
    Invalid(String),

    #[error("Skill not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from sandboxed skill execution.
///
/// `Compile` and `Runtime` are distinct so callers can tell a broken
/// skill from one that merely ran too long.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Skill failed to compile: {0}")]
    Compile(String),

    #[error("Skill raised an error: {0}")]
    Runtime(String),

    #[error("Skill timed out after {0}ms")]
    Timeout(u64),

    #[error("Skill result could not be serialized: {0}")]
    Serialize(String),

    #[error("Sandbox runner unavailable: {0}")]
    Runner(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from tool dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {name}. Available tools: {available}")]
    NotFound { name: String, available: String },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Approval denied for tool '{0}'")]
    Denied(String),

    #[error("Approval handler error: {0}")]
    Approval(#[source] anyhow::Error),

    #[error("Security block: {0}")]
    Security(#[from] SecurityError),

    #[error("Tool '{tool}' failed: {source}")]
    Execution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },
}
