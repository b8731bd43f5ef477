// ABOUTME: ToolHost - the owned context wiring catalog, sandbox, registry,
// ABOUTME: validator, and approval gate into one dispatch pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::OnceCell;

use crate::approval::{AlwaysDeny, ApprovalContext, ApprovalHandler};
use crate::catalog::SkillCatalog;
use crate::config::HostConfig;
use crate::error::{SkilletError, ToolError};
use crate::sandbox::{Capabilities, NodeLoader, SandboxEngine, SkillLoader};
use crate::security;
use crate::tool::{GuardKind, Registry, SkillTool, Tool};
use crate::tools;

/// The single dispatch point the planning loop calls into.
///
/// Owns the registry, catalog, sandbox engine, and approval gate.
/// Construct one at startup and pass it by reference; there is no
/// process-wide singleton. Initialization is lazy and happens exactly
/// once, even under concurrent first calls.
pub struct ToolHost {
    config: HostConfig,
    catalog: SkillCatalog,
    engine: Arc<SandboxEngine>,
    registry: Registry,
    approval: Arc<dyn ApprovalHandler>,
    init: OnceCell<()>,
}

impl ToolHost {
    /// Create a host from configuration, using the default node loader
    /// and an approval gate that denies everything. Wire a real gate
    /// with [`with_approval`](Self::with_approval).
    pub fn new(config: HostConfig) -> Self {
        let loader: Arc<dyn SkillLoader> = Arc::new(NodeLoader::with_binary(&config.node_binary));
        Self::with_loader(config, loader)
    }

    /// Create a host with an explicit skill loader.
    pub fn with_loader(config: HostConfig, loader: Arc<dyn SkillLoader>) -> Self {
        let catalog = SkillCatalog::new(&config.skills_dir);
        let mut caps = Capabilities::new(&config.project_root);
        if config.allow_net {
            caps = caps.with_network();
        }
        let engine = Arc::new(SandboxEngine::new(
            loader,
            caps,
            Duration::from_millis(config.timeout_ms),
        ));
        Self {
            config,
            catalog,
            engine,
            registry: Registry::new(),
            approval: Arc::new(AlwaysDeny),
            init: OnceCell::new(),
        }
    }

    /// Set the approval gate consulted for high-risk invocations.
    pub fn with_approval(mut self, handler: impl ApprovalHandler + 'static) -> Self {
        self.approval = Arc::new(handler);
        self
    }

    /// The skill catalog backing this host.
    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Initialize the tool set if it has not been loaded yet.
    ///
    /// A second concurrent caller waits for the first load instead of
    /// re-scanning.
    pub async fn ensure_loaded(&self) -> Result<(), SkilletError> {
        self.init
            .get_or_try_init(|| self.load_all())
            .await
            .map(|_| ())
    }

    /// Clear and rebuild the whole tool catalog.
    ///
    /// Used after a new skill is created at runtime so it becomes
    /// callable without a process restart.
    pub async fn reload(&self) -> Result<(), SkilletError> {
        self.load_all().await?;
        // Reloading before first use also counts as initialization.
        let _ = self.init.set(());
        Ok(())
    }

    /// List all tool names.
    pub async fn list(&self) -> Result<Vec<String>, SkilletError> {
        self.ensure_loaded().await?;
        Ok(self.registry.list().await)
    }

    /// Look up one tool by name.
    pub async fn get(&self, name: &str) -> Result<Option<Arc<dyn Tool>>, SkilletError> {
        self.ensure_loaded().await?;
        Ok(self.registry.get(name).await)
    }

    /// Execute a tool by name.
    ///
    /// High-risk invocations suspend on the approval gate first; a
    /// denial is surfaced as a failure and never retried. Declared
    /// argument guards then run through the security validator, with
    /// path guards substituting the resolved absolute path. Failures
    /// are wrapped with the tool's name for traceability.
    pub async fn execute(
        &self,
        name: &str,
        mut args: serde_json::Value,
    ) -> Result<crate::tool::ToolResult, SkilletError> {
        self.ensure_loaded().await?;

        // Guard substitution needs a map to write into.
        if !args.is_object() {
            args = serde_json::Value::Object(serde_json::Map::new());
        }

        let Some(tool) = self.registry.get(name).await else {
            return Err(ToolError::NotFound {
                name: name.to_string(),
                available: self.registry.list().await.join(", "),
            }
            .into());
        };

        if security::is_high_risk(name, &args) || tool.requires_approval(&args) {
            let context = ApprovalContext::new(tool.description());
            match self.approval.request_approval(name, &args, &context).await {
                Ok(true) => {}
                Ok(false) => return Err(ToolError::Denied(name.to_string()).into()),
                Err(e) => return Err(ToolError::Approval(e).into()),
            }
        }

        self.apply_guards(tool.as_ref(), &mut args)?;

        let started = Instant::now();
        let result = tool.execute(args).await.map_err(|e| ToolError::Execution {
            tool: name.to_string(),
            source: e,
        })?;
        tracing::debug!(
            tool = name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            is_error = result.is_error,
            "tool executed"
        );
        Ok(result)
    }

    /// Run a tool's declared argument guards through the validator.
    fn apply_guards(
        &self,
        tool: &dyn Tool,
        args: &mut serde_json::Value,
    ) -> Result<(), ToolError> {
        let Some(object) = args.as_object_mut() else {
            return Ok(());
        };
        for guard in tool.guards() {
            let Some(raw) = object.get(guard.field).and_then(|v| v.as_str()) else {
                // An omitted path means the project root, never the
                // process working directory.
                if guard.kind == GuardKind::Path {
                    object.insert(
                        guard.field.to_string(),
                        serde_json::Value::String(
                            self.config.project_root.to_string_lossy().into_owned(),
                        ),
                    );
                }
                continue;
            };
            let raw = raw.to_string();
            match guard.kind {
                GuardKind::Path => {
                    let resolved = security::validate_path(&raw, &self.config.project_root)?;
                    object.insert(
                        guard.field.to_string(),
                        serde_json::Value::String(resolved.to_string_lossy().into_owned()),
                    );
                }
                GuardKind::Command => {
                    security::validate_command(&raw)?;
                }
                GuardKind::Pattern => {
                    security::validate_pattern(&raw)?;
                }
                GuardKind::Sql => {
                    security::validate_sql(&raw)?;
                }
                GuardKind::Url => {
                    security::validate_url(&raw)?;
                }
            }
        }
        Ok(())
    }

    /// Build the full tool set: built-ins first, then skills, later
    /// registrations overwriting earlier ones of the same name.
    async fn load_all(&self) -> Result<(), SkilletError> {
        let mut tools: Vec<Arc<dyn Tool>> = Vec::new();

        for tool in self.builtin_tools() {
            if tool.name().trim().is_empty() {
                tracing::warn!("skipping built-in tool with empty name");
                continue;
            }
            tools.push(tool);
        }

        for record in self.catalog.load()? {
            tools.push(Arc::new(SkillTool::new(record, Arc::clone(&self.engine))));
        }

        tracing::debug!(count = tools.len(), "loaded tool catalog");
        self.registry.replace_all(tools).await;
        Ok(())
    }

    fn builtin_tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![
            Arc::new(tools::ReadFileTool),
            Arc::new(tools::WriteFileTool),
            Arc::new(tools::ListFilesTool),
            Arc::new(tools::SearchTool),
            Arc::new(tools::FsTool),
            Arc::new(tools::BashTool),
            Arc::new(tools::WebFetchTool::new()),
            Arc::new(tools::CreateSkillTool::new(self.catalog.clone())),
            Arc::new(tools::DeleteSkillTool::new(self.catalog.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::AlwaysApprove;
    use crate::error::SecurityError;
    use tempfile::TempDir;

    fn host(root: &std::path::Path) -> ToolHost {
        ToolHost::new(HostConfig::new(root)).with_approval(AlwaysApprove)
    }

    #[tokio::test]
    async fn test_builtins_are_loaded_lazily() {
        let dir = TempDir::new().unwrap();
        let host = host(dir.path());

        let names = host.list().await.unwrap();
        assert!(names.contains(&"read_file".to_string()));
        assert!(names.contains(&"bash".to_string()));
        assert!(names.contains(&"create_skill".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_tool_lists_available_names() {
        let dir = TempDir::new().unwrap();
        let host = host(dir.path());

        let err = host
            .execute("no_such_tool", serde_json::json!({}))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("no_such_tool"));
        assert!(message.contains("read_file"));
        assert!(message.contains("bash"));
    }

    #[tokio::test]
    async fn test_high_risk_denied_by_default_gate() {
        let dir = TempDir::new().unwrap();
        // No with_approval: the default gate denies.
        let host = ToolHost::new(HostConfig::new(dir.path()));

        let err = host
            .execute("bash", serde_json::json!({"command": "echo hi"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkilletError::Tool(ToolError::Denied(ref name)) if name == "bash"
        ));
    }

    #[tokio::test]
    async fn test_low_risk_skips_the_gate() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "hi there").unwrap();
        let host = ToolHost::new(HostConfig::new(dir.path()));

        let result = host
            .execute("read_file", serde_json::json!({"path": "hello.txt"}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content, "hi there");
    }

    #[tokio::test]
    async fn test_path_guard_blocks_traversal() {
        let dir = TempDir::new().unwrap();
        let host = host(dir.path());

        let err = host
            .execute("read_file", serde_json::json!({"path": "../../etc/passwd"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkilletError::Tool(ToolError::Security(SecurityError::Path(_)))
        ));
    }

    #[tokio::test]
    async fn test_command_guard_blocks_denylisted_command() {
        let dir = TempDir::new().unwrap();
        let host = host(dir.path());

        let err = host
            .execute("bash", serde_json::json!({"command": "sudo rm -rf /"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkilletError::Tool(ToolError::Security(SecurityError::Command(_)))
        ));
    }

    #[tokio::test]
    async fn test_url_guard_blocks_metadata_endpoint() {
        let dir = TempDir::new().unwrap();
        let host = host(dir.path());

        let err = host
            .execute(
                "web_fetch",
                serde_json::json!({"url": "http://169.254.169.254/latest/meta-data"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkilletError::Tool(ToolError::Security(SecurityError::Url(_)))
        ));
    }

    #[tokio::test]
    async fn test_fs_delete_heuristic_hits_the_gate() {
        let dir = TempDir::new().unwrap();
        let host = ToolHost::new(HostConfig::new(dir.path()));

        let err = host
            .execute(
                "fs",
                serde_json::json!({"operation": "delete", "path": "junk.txt"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SkilletError::Tool(ToolError::Denied(_))));

        // Read-flavored fs calls pass without the gate.
        std::fs::write(dir.path().join("ok.txt"), "fine").unwrap();
        let result = host
            .execute(
                "fs",
                serde_json::json!({"operation": "read", "path": "ok.txt"}),
            )
            .await
            .unwrap();
        assert_eq!(result.content, "fine");
    }

    #[tokio::test]
    async fn test_search_defaults_to_project_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "qzv_marker_line here").unwrap();
        let host = host(dir.path());

        let result = host
            .execute("search", serde_json::json!({"pattern": "qzv_marker_line"}))
            .await
            .unwrap();
        assert!(result.content.contains("notes.txt"));
        // Matches come from under the project root, not the process CWD.
        assert!(result.content.contains(dir.path().to_str().unwrap()));
    }

    #[tokio::test]
    async fn test_list_files_defaults_to_project_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("only_here.txt"), "").unwrap();
        let host = host(dir.path());

        let result = host
            .execute("list_files", serde_json::json!({}))
            .await
            .unwrap();
        assert!(result.content.contains("only_here.txt"));
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_skill() {
        let dir = TempDir::new().unwrap();
        let host = host(dir.path());

        let before = host.list().await.unwrap();
        assert!(!before.contains(&"greeter".to_string()));

        host.catalog()
            .save(
                "Greeter",
                "Say hello",
                "function run(args) { return 'hello ' + args.name; }",
                serde_json::json!({}),
            )
            .unwrap();
        host.reload().await.unwrap();

        let after = host.list().await.unwrap();
        assert!(after.contains(&"greeter".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_first_use_initializes_once() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(host(dir.path()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let host = Arc::clone(&host);
            handles.push(tokio::spawn(async move { host.list().await.unwrap() }));
        }
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        for result in &results[1..] {
            assert_eq!(result, &results[0]);
        }
    }
}
