// ABOUTME: Risk classification - decides which tool invocations must pass
// ABOUTME: through the approval gate. Pure function, never errors.

/// Tool names that always require approval.
const HIGH_RISK_TOOLS: &[&str] = &[
    "write_file",
    "bash",
    "web_fetch",
    "create_skill",
    "delete_skill",
    "sql_query",
];

/// Classify a tool invocation as high-risk or not.
///
/// The generic `fs` tool is additionally classified by a substring match
/// on its serialized arguments. That heuristic both over- and
/// under-matches; [`Tool::requires_approval`](crate::tool::Tool) is the
/// explicit per-tool declaration that supersedes it.
pub fn is_high_risk(name: &str, args: &serde_json::Value) -> bool {
    if HIGH_RISK_TOOLS.contains(&name) {
        return true;
    }

    if name == "fs" {
        let serialized = args.to_string().to_lowercase();
        return serialized.contains("delete") || serialized.contains("remove");
    }

    false
}
