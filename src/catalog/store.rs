// ABOUTME: SkillCatalog - directory-backed skill storage. Scans, saves,
// ABOUTME: deletes, and lists skill source files by normalized name.

use std::path::{Path, PathBuf};

use super::meta::{self, SkillMeta};
use crate::error::CatalogError;

/// File extension for skill source files.
pub const SKILL_EXT: &str = "js";

/// One discovered skill: its parsed metadata and full source text.
#[derive(Debug, Clone)]
pub struct SkillRecord {
    pub meta: SkillMeta,
    pub source: String,
    pub path: PathBuf,
}

/// Directory-backed catalog of skill source files.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    dir: PathBuf,
}

impl SkillCatalog {
    /// Create a catalog over the given storage directory.
    ///
    /// The directory is created on first use if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The catalog's storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the storage directory and return every well-formed skill.
    ///
    /// Files with missing or malformed metadata are logged and skipped;
    /// a single bad file never aborts the scan. Loading twice with an
    /// unchanged directory yields the same records.
    pub fn load(&self) -> Result<Vec<SkillRecord>, CatalogError> {
        std::fs::create_dir_all(&self.dir)?;

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(SKILL_EXT))
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            let source = match std::fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable skill file");
                    continue;
                }
            };
            match meta::extract_meta(&source) {
                Ok(meta) => records.push(SkillRecord { meta, source, path }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping skill with malformed metadata");
                }
            }
        }
        Ok(records)
    }

    /// Save a new skill, overwriting any existing skill of the same
    /// normalized name. Returns the path written.
    pub fn save(
        &self,
        name: &str,
        description: &str,
        code: &str,
        args_schema: serde_json::Value,
    ) -> Result<PathBuf, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::Invalid(
                "skill name must be a non-empty string".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(CatalogError::Invalid(
                "skill description must be a non-empty string".to_string(),
            ));
        }
        if code.trim().is_empty() {
            return Err(CatalogError::Invalid(
                "skill code must be a non-empty string".to_string(),
            ));
        }

        let normalized = meta::normalize_name(name);
        if normalized.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "skill name {name:?} contains no usable characters"
            )));
        }

        if !meta::declares_entry(code) {
            return Err(CatalogError::Invalid(
                "skill code must define a run() entry function".to_string(),
            ));
        }

        let skill_meta = SkillMeta {
            name: normalized.clone(),
            description: description.trim().to_string(),
            args_schema,
        };
        let contents = meta::format_skill(&skill_meta, code)?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{normalized}.{SKILL_EXT}"));
        std::fs::write(&path, contents)?;
        tracing::debug!(skill = %normalized, path = %path.display(), "saved skill");
        Ok(path)
    }

    /// Delete a skill by name.
    pub fn delete(&self, name: &str) -> Result<(), CatalogError> {
        let normalized = meta::normalize_name(name);
        let path = self.dir.join(format!("{normalized}.{SKILL_EXT}"));
        if !path.exists() {
            return Err(CatalogError::NotFound(normalized));
        }
        std::fs::remove_file(&path)?;
        tracing::debug!(skill = %normalized, "deleted skill");
        Ok(())
    }

    /// List stored skill names (normalized, extension stripped), sorted.
    ///
    /// Stems pass through name normalization so a hand-added file with
    /// an unnormalized filename still lists under its callable name.
    pub fn list(&self) -> Result<Vec<String>, CatalogError> {
        std::fs::create_dir_all(&self.dir)?;
        let mut names: Vec<String> = std::fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(SKILL_EXT))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .map(|stem| meta::normalize_name(&stem))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CODE: &str = "function run(args) { return 'ok'; }";

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        catalog
            .save("CSV Helper!", "Transforms CSV data", CODE, serde_json::json!({}))
            .unwrap();

        let records = catalog.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].meta.name, "csv_helper");
        assert_eq!(records[0].meta.description, "Transforms CSV data");
    }

    #[test]
    fn test_save_normalizes_filename() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        let path = catalog
            .save("CSV Helper!", "desc", CODE, serde_json::json!({}))
            .unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "csv_helper.js");
    }

    #[test]
    fn test_save_rejects_missing_entry_function() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        let err = catalog
            .save("broken", "desc", "function main() {}", serde_json::json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("run()"));
    }

    #[test]
    fn test_save_rejects_empty_fields() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        assert!(catalog.save("", "desc", CODE, serde_json::json!({})).is_err());
        assert!(catalog.save("name", "", CODE, serde_json::json!({})).is_err());
        assert!(catalog.save("name", "desc", "  ", serde_json::json!({})).is_err());
        assert!(catalog.save("!!!", "desc", CODE, serde_json::json!({})).is_err());
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        catalog.save("tool", "first", CODE, serde_json::json!({})).unwrap();
        catalog.save("Tool", "second", CODE, serde_json::json!({})).unwrap();

        let records = catalog.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].meta.description, "second");
    }

    #[test]
    fn test_load_skips_malformed_files() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        catalog.save("good", "a valid skill", CODE, serde_json::json!({})).unwrap();
        std::fs::write(dir.path().join("bad.js"), "no metadata here").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a skill").unwrap();

        let records = catalog.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].meta.name, "good");
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        catalog.save("one", "first", CODE, serde_json::json!({})).unwrap();
        catalog.save("two", "second", CODE, serde_json::json!({})).unwrap();

        let first: Vec<String> = catalog.load().unwrap().iter().map(|r| r.meta.name.clone()).collect();
        let second: Vec<String> = catalog.load().unwrap().iter().map(|r| r.meta.name.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["one", "two"]);
    }

    #[test]
    fn test_load_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path().join("not").join("yet"));
        assert!(catalog.load().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        catalog.save("Doomed Skill", "desc", CODE, serde_json::json!({})).unwrap();
        catalog.delete("Doomed Skill").unwrap();
        assert!(catalog.list().unwrap().is_empty());

        assert!(matches!(
            catalog.delete("doomed_skill"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_normalizes_hand_added_filenames() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        let skill_meta = SkillMeta {
            name: "my_skill".to_string(),
            description: "hand-copied into the directory".to_string(),
            args_schema: serde_json::json!({}),
        };
        let contents = meta::format_skill(&skill_meta, CODE).unwrap();
        std::fs::write(dir.path().join("My Skill.js"), contents).unwrap();

        assert_eq!(catalog.list().unwrap(), vec!["my_skill"]);
    }

    #[test]
    fn test_list_strips_extension() {
        let dir = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(dir.path());

        catalog.save("beta", "b", CODE, serde_json::json!({})).unwrap();
        catalog.save("alpha", "a", CODE, serde_json::json!({})).unwrap();

        assert_eq!(catalog.list().unwrap(), vec!["alpha", "beta"]);
    }
}
