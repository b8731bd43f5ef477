// ABOUTME: Tests for tool Registry - registration, lookup, wholesale
// ABOUTME: replacement, thread safety. Uses a mock tool.

use std::sync::Arc;

use super::*;

/// A simple test tool.
struct EchoTool;

#[async_trait::async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes input back"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "message": { "type": "string" }
            },
            "required": ["message"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let message = params["message"].as_str().unwrap_or("");
        Ok(ToolResult::text(message))
    }
}

/// Same shape, different name, for replacement tests.
struct NamedTool(&'static str);

#[async_trait::async_trait]
impl Tool for NamedTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "named"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object" })
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::text(self.0))
    }
}

#[tokio::test]
async fn test_register_and_get() {
    let registry = Registry::new();
    registry.register(EchoTool).await;

    let tool = registry.get("echo").await;
    assert!(tool.is_some());
    assert_eq!(tool.unwrap().name(), "echo");
}

#[tokio::test]
async fn test_get_nonexistent() {
    let registry = Registry::new();
    assert!(registry.get("nonexistent").await.is_none());
}

#[tokio::test]
async fn test_unregister() {
    let registry = Registry::new();
    registry.register(EchoTool).await;
    assert_eq!(registry.count().await, 1);

    registry.unregister("echo").await;
    assert_eq!(registry.count().await, 0);
}

#[tokio::test]
async fn test_later_registration_wins() {
    let registry = Registry::new();
    registry.register(NamedTool("echo")).await;
    registry.register(EchoTool).await;

    assert_eq!(registry.count().await, 1);
    let tool = registry.get("echo").await.unwrap();
    assert_eq!(tool.description(), "Echoes input back");
}

#[tokio::test]
async fn test_list_is_sorted() {
    let registry = Registry::new();
    registry.register(NamedTool("zeta")).await;
    registry.register(NamedTool("alpha")).await;

    assert_eq!(registry.list().await, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_replace_all() {
    let registry = Registry::new();
    registry.register(EchoTool).await;
    registry.register(NamedTool("old")).await;

    registry
        .replace_all(vec![Arc::new(NamedTool("fresh")) as Arc<dyn Tool>])
        .await;

    assert_eq!(registry.list().await, vec!["fresh"]);
    assert!(registry.get("echo").await.is_none());
}

#[tokio::test]
async fn test_clone_shares_state() {
    let registry = Registry::new();
    let clone = registry.clone();

    registry.register(EchoTool).await;
    assert_eq!(clone.count().await, 1);
}
