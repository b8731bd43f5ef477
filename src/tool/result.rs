// ABOUTME: Defines the ToolResult type - a unified structure for tool
// ABOUTME: execution outcomes with content, error state, and metadata.

use std::collections::HashMap;

use serde::Serialize;

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The output content.
    pub content: String,

    /// Whether this result represents an error.
    pub is_error: bool,

    /// Optional metadata about the execution.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            metadata: HashMap::new(),
        }
    }

    /// Create a successful result from a JSON value, serialized as text.
    pub fn json(value: &impl Serialize) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(text) => Self::text(text),
            Err(e) => Self::error(format!("Result not serializable: {e}")),
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::text("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_result() {
        let result = ToolResult::text("hello");
        assert_eq!(result.content, "hello");
        assert!(!result.is_error);
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn test_error_result() {
        let result = ToolResult::error("it broke");
        assert_eq!(result.content, "it broke");
        assert!(result.is_error);
    }

    #[test]
    fn test_json_result() {
        let result = ToolResult::json(&serde_json::json!({"n": 1}));
        assert!(!result.is_error);
        assert!(result.content.contains("\"n\": 1"));
    }

    #[test]
    fn test_with_metadata() {
        let result = ToolResult::text("ok").with_metadata("elapsed_ms", 12);
        assert_eq!(result.metadata["elapsed_ms"], serde_json::json!(12));
    }
}
