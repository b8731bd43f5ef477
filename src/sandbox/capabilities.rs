// ABOUTME: Capabilities - the explicit allowlist of bindings a running skill
// ABOUTME: may use. Passed by value into each invocation, never a global.

use std::path::{Path, PathBuf};

/// The capability set handed to a skill invocation.
///
/// Skills see exactly what this struct grants and nothing else: a
/// read-only filesystem facade rooted at `fs_root` (read/stat/list), a
/// path join/resolve facade confined to the same root, and optionally
/// an outbound fetch primitive. There is no ambient import system,
/// process spawning, or write access.
#[derive(Debug, Clone)]
pub struct Capabilities {
    fs_root: PathBuf,
    allow_net: bool,
}

impl Capabilities {
    /// Grant read-only filesystem access under the given root.
    pub fn new(fs_root: impl Into<PathBuf>) -> Self {
        Self {
            fs_root: fs_root.into(),
            allow_net: false,
        }
    }

    /// Additionally grant the outbound network-fetch primitive.
    pub fn with_network(mut self) -> Self {
        self.allow_net = true;
        self
    }

    /// Root of the read-only filesystem facade.
    pub fn fs_root(&self) -> &Path {
        &self.fs_root
    }

    /// Whether the fetch primitive is granted.
    pub fn network_allowed(&self) -> bool {
        self.allow_net
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_defaults_off() {
        let caps = Capabilities::new("/proj");
        assert!(!caps.network_allowed());
        assert_eq!(caps.fs_root(), Path::new("/proj"));
    }

    #[test]
    fn test_with_network() {
        let caps = Capabilities::new("/proj").with_network();
        assert!(caps.network_allowed());
    }
}
