// ABOUTME: Configuration for the tool host - project root, skill storage,
// ABOUTME: sandbox timeout, and runtime selection.

use std::path::PathBuf;

/// Directory under the project root reserved for the agent's own state.
///
/// Paths resolving under this subtree are always accepted by path
/// validation, even though the subtree sits inside the project root.
pub const STATE_DIR: &str = ".skillet";

/// Default wall-clock deadline for a single skill invocation.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration for a [`ToolHost`](crate::host::ToolHost).
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// The project root all filesystem access is confined to.
    pub project_root: PathBuf,

    /// Directory holding skill source files, one file per skill.
    pub skills_dir: PathBuf,

    /// Execution timeout applied uniformly to every skill invocation.
    pub timeout_ms: u64,

    /// Whether skills get the outbound network-fetch capability.
    pub allow_net: bool,

    /// Binary used to run the sandbox harness.
    pub node_binary: String,
}

impl HostConfig {
    /// Create a config rooted at the given project directory.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let skills_dir = project_root.join(STATE_DIR).join("skills");
        Self {
            project_root,
            skills_dir,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            allow_net: false,
            node_binary: "node".to_string(),
        }
    }

    /// Override the skill storage directory.
    pub fn skills_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skills_dir = dir.into();
        self
    }

    /// Override the skill execution timeout in milliseconds.
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Allow skills to make outbound network requests.
    pub fn allow_network(mut self, allow: bool) -> Self {
        self.allow_net = allow;
        self
    }

    /// Override the sandbox runtime binary (default: `node`).
    pub fn node_binary(mut self, binary: impl Into<String>) -> Self {
        self.node_binary = binary.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::new("/proj");
        assert_eq!(config.project_root, PathBuf::from("/proj"));
        assert_eq!(config.skills_dir, PathBuf::from("/proj/.skillet/skills"));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!config.allow_net);
    }

    #[test]
    fn test_builder_overrides() {
        let config = HostConfig::new("/proj")
            .skills_dir("/elsewhere/skills")
            .timeout_ms(500)
            .allow_network(true)
            .node_binary("nodejs");
        assert_eq!(config.skills_dir, PathBuf::from("/elsewhere/skills"));
        assert_eq!(config.timeout_ms, 500);
        assert!(config.allow_net);
        assert_eq!(config.node_binary, "nodejs");
    }
}
