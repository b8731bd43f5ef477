// ABOUTME: Path validation - confines filesystem access to the project root.
// ABOUTME: Resolves traversal segments lexically and blocks sensitive names.

use std::path::{Component, Path, PathBuf};

use crate::config::STATE_DIR;
use crate::error::SecurityError;

/// Directory segments that are never accessible, regardless of location.
const BLOCKED_DIRS: &[&str] = &[".git", ".svn", ".hg", ".ssh", ".aws", ".gnupg", ".kube"];

/// Final path segments (lowercased) that are never accessible.
const BLOCKED_FILES: &[&str] = &[
    ".env",
    ".envrc",
    ".netrc",
    ".npmrc",
    ".pgpass",
    ".git-credentials",
    ".bash_history",
    ".zsh_history",
    "id_rsa",
    "id_dsa",
    "id_ecdsa",
    "id_ed25519",
    "credentials",
    "credentials.json",
];

/// Validate a candidate path against the project root.
///
/// The candidate is resolved lexically (handling `.`, `..`, and mixed
/// separators) before any check runs, so traversal cannot hide behind
/// relative segments. Paths under the agent's own state subtree are
/// accepted outright. Everything else must resolve to the root or
/// below it, and must not name a blocked directory or file.
///
/// Returns the absolute resolved path on success.
pub fn validate_path(candidate: &str, root: &Path) -> Result<PathBuf, SecurityError> {
    if candidate.trim().is_empty() {
        return Err(SecurityError::Path("empty path".to_string()));
    }

    // Normalize Windows-style separators so `..\` cannot slip past.
    let normalized = candidate.replace('\\', "/");
    let candidate_path = Path::new(&normalized);

    let root = resolve_lexically(root);
    let joined = if candidate_path.is_absolute() {
        candidate_path.to_path_buf()
    } else {
        root.join(candidate_path)
    };
    let resolved = resolve_lexically(&joined);

    // The agent's own working storage is always reachable.
    if resolved.starts_with(root.join(STATE_DIR)) {
        return Ok(resolved);
    }

    if resolved != root && !resolved.starts_with(&root) {
        return Err(SecurityError::Path(format!(
            "path traversal outside project root: {candidate}"
        )));
    }

    for component in resolved.components() {
        if let Component::Normal(segment) = component {
            let lower = segment.to_string_lossy().to_lowercase();
            if BLOCKED_DIRS.contains(&lower.as_str()) {
                return Err(SecurityError::Path(format!(
                    "access to protected directory '{lower}' is not allowed"
                )));
            }
        }
    }

    if let Some(name) = resolved.file_name() {
        let lower = name.to_string_lossy().to_lowercase();
        if BLOCKED_FILES.contains(&lower.as_str()) || lower.starts_with(".env.") {
            return Err(SecurityError::Path(format!(
                "access to protected file '{lower}' is not allowed"
            )));
        }
    }

    Ok(resolved)
}

/// Resolve `.` and `..` segments without touching the filesystem.
///
/// Lexical resolution is deliberate: the target may not exist yet, and
/// the traversal check must hold for paths that are about to be created.
fn resolve_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(std::path::MAIN_SEPARATOR_STR),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
