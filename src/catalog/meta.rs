// ABOUTME: Skill metadata block - the delimited JSON descriptor at the top of
// ABOUTME: every skill source file, plus name normalization helpers.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Opening marker of the metadata block.
pub const META_BEGIN: &str = "==skill==";

/// Closing marker of the metadata block.
pub const META_END: &str = "==end-skill==";

/// Persisted skill descriptor, embedded as a comment block at the top of
/// the skill's source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMeta {
    /// Skill name; normalized to lowercase + underscores when saved.
    pub name: String,

    /// Human-readable description, shown to the planning loop.
    pub description: String,

    /// JSON-schema-shaped description of accepted arguments.
    /// Advisory only; the execution engine does not enforce it.
    #[serde(default)]
    pub args_schema: serde_json::Value,
}

/// Single non-greedy scan for the delimited metadata block.
fn meta_block() -> Regex {
    Regex::new(r"(?s)/\*\s*==skill==(.*?)==end-skill==\s*\*/").expect("meta block regex is valid")
}

/// Extract and parse the metadata block from skill source text.
pub fn extract_meta(source: &str) -> Result<SkillMeta, CatalogError> {
    let captures = meta_block().captures(source).ok_or_else(|| {
        CatalogError::Invalid(format!(
            "no metadata block found (expected /* {META_BEGIN} ... {META_END} */)"
        ))
    })?;

    let meta: SkillMeta = serde_json::from_str(captures[1].trim())
        .map_err(|e| CatalogError::Invalid(format!("metadata block is not valid JSON: {e}")))?;

    if meta.name.trim().is_empty() || meta.description.trim().is_empty() {
        return Err(CatalogError::Invalid(
            "metadata must include a non-empty name and description".to_string(),
        ));
    }

    Ok(meta)
}

/// Remove the metadata block, leaving only the executable body.
pub fn strip_meta(source: &str) -> String {
    meta_block().replace(source, "").into_owned()
}

/// Serialize metadata plus code into the on-disk skill file format.
pub fn format_skill(meta: &SkillMeta, code: &str) -> Result<String, CatalogError> {
    let body = serde_json::to_string_pretty(meta)
        .map_err(|e| CatalogError::Invalid(format!("metadata is not serializable: {e}")))?;
    Ok(format!(
        "/* {META_BEGIN}\n{body}\n{META_END} */\n{}\n",
        code.trim_end()
    ))
}

/// Normalize a skill name to lowercase alphanumerics and underscores.
///
/// The normalized name doubles as the tool name and the filename stem.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::new();
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

/// Whether skill code declares a `run` entry binding by convention.
///
/// Accepts a `run` function declaration, a `run` binding assignment, an
/// `exports.run` assignment, or a `module.exports` default export.
pub fn declares_entry(code: &str) -> bool {
    let entry = Regex::new(
        r"(?m)^\s*(?:async\s+)?function\s+run\s*\(|(?:const|let|var)\s+run\s*=|exports\.run\s*=|module\.exports\s*=",
    )
    .expect("entry detector regex is valid");
    entry.is_match(code)
}
