// ABOUTME: Shell command validation - a fixed denylist of destructive and
// ABOUTME: injection-prone substrings. A blunt filter, not a parser.

use crate::error::SecurityError;

/// Substrings that reject a command outright.
///
/// This is a denylist match on the lowercased command string. It makes
/// no attempt to parse shell syntax, so it can be bypassed by a
/// determined adversary and can reject unusual-but-legitimate commands.
const DENIED_SUBSTRINGS: &[&str] = &[
    "rm -rf /",
    "rm -fr /",
    "--no-preserve-root",
    ":(){",
    ":() {",
    "mkfs",
    "dd if=/dev/",
    "> /dev/sd",
    ">/dev/sd",
    "sudo ",
    "doas ",
    "$(",
    "`",
];

/// Shell spellings that consume a piped download.
const SHELL_PIPES: &[&str] = &["| sh", "| bash", "|sh", "|bash"];

/// Validate a shell command fragment before execution.
pub fn validate_command(command: &str) -> Result<(), SecurityError> {
    if command.trim().is_empty() {
        return Err(SecurityError::Command("empty command".to_string()));
    }

    let lower = command.to_lowercase();
    for denied in DENIED_SUBSTRINGS {
        if lower.contains(denied) {
            return Err(SecurityError::Command(format!(
                "command contains blocked pattern {denied:?}"
            )));
        }
    }

    // curl http://… | sh and friends.
    let downloads = lower.contains("curl") || lower.contains("wget");
    if downloads && SHELL_PIPES.iter().any(|pipe| lower.contains(pipe)) {
        return Err(SecurityError::Command(
            "piping a download into a shell is not allowed".to_string(),
        ));
    }

    Ok(())
}
