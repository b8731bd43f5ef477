// ABOUTME: Regex pattern validation - length cap and catastrophic-backtracking
// ABOUTME: shape detection before any compilation is attempted.

use regex::Regex;

use crate::error::SecurityError;

/// Maximum accepted pattern length.
pub const MAX_PATTERN_LEN: usize = 200;

/// Validate a user-supplied regex pattern.
///
/// Oversized patterns and known catastrophic-backtracking shapes
/// (a `*`/`+` group itself followed by `*`/`+`, e.g. `(a*)*`) are
/// rejected before compilation. Returns the pattern on success.
pub fn validate_pattern(pattern: &str) -> Result<&str, SecurityError> {
    if pattern.is_empty() {
        return Err(SecurityError::Pattern("empty pattern".to_string()));
    }
    if pattern.len() > MAX_PATTERN_LEN {
        return Err(SecurityError::Pattern(format!(
            "pattern exceeds maximum length of {MAX_PATTERN_LEN} characters"
        )));
    }

    let nested_quantifier =
        Regex::new(r"\([^)]*[*+]\)\s*[*+]").expect("nested quantifier detector is valid");
    if nested_quantifier.is_match(pattern) {
        return Err(SecurityError::Pattern(
            "pattern contains nested unbounded quantifiers".to_string(),
        ));
    }

    if let Err(e) = Regex::new(pattern) {
        return Err(SecurityError::Pattern(format!(
            "pattern failed to compile: {e}"
        )));
    }

    Ok(pattern)
}
