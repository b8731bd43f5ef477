// ABOUTME: Convenience re-exports for embedders.
// ABOUTME: `use skillet::prelude::*` pulls in the common surface.

pub use crate::approval::{AlwaysApprove, AlwaysDeny, ApprovalContext, ApprovalHandler};
pub use crate::catalog::{SkillCatalog, SkillMeta, SkillRecord, normalize_name};
pub use crate::config::{DEFAULT_TIMEOUT_MS, HostConfig, STATE_DIR};
pub use crate::error::{
    CatalogError, SandboxError, SecurityError, SkilletError, ToolError,
};
pub use crate::host::ToolHost;
pub use crate::sandbox::{
    Capabilities, CompiledSkill, NodeLoader, SandboxEngine, SkillLoader,
};
pub use crate::security::{
    is_high_risk, validate_command, validate_path, validate_pattern, validate_sql, validate_url,
};
pub use crate::tool::{
    ArgGuard, GuardKind, Registry, SkillTool, Tool, ToolResult, ToolSource,
};
