// ABOUTME: SQL statement validation - allowed leading verbs, single-statement
// ABOUTME: enforcement, and injection/exfiltration marker rejection.

use crate::error::SecurityError;

/// Verbs a statement may begin with.
const ALLOWED_VERBS: &[&str] = &["select", "insert", "update", "delete", "create", "alter"];

/// Markers that reject a statement regardless of verb.
const DENIED_MARKERS: &[&str] = &[
    "--",
    "/*",
    "union select",
    "load_file(",
    "into outfile",
    "into dumpfile",
    "readfile(",
    "writefile(",
    "sleep(",
    "benchmark(",
    "pg_sleep(",
    "waitfor delay",
];

/// Validate a SQL statement before it reaches a database.
///
/// Exactly one statement is allowed; a single trailing `;` is fine.
pub fn validate_sql(statement: &str) -> Result<(), SecurityError> {
    let trimmed = statement.trim();
    if trimmed.is_empty() {
        return Err(SecurityError::Sql("empty statement".to_string()));
    }

    let lower = trimmed.to_lowercase();
    let verb = lower.split_whitespace().next().unwrap_or("");
    if !ALLOWED_VERBS.contains(&verb) {
        return Err(SecurityError::Sql(format!(
            "statement must begin with one of {ALLOWED_VERBS:?}, got {verb:?}"
        )));
    }

    let body = lower.strip_suffix(';').unwrap_or(&lower);
    if body.contains(';') {
        return Err(SecurityError::Sql(
            "multiple statements are not allowed".to_string(),
        ));
    }

    for marker in DENIED_MARKERS {
        if lower.contains(marker) {
            return Err(SecurityError::Sql(format!(
                "statement contains blocked marker {marker:?}"
            )));
        }
    }

    Ok(())
}
