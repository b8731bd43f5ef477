// ABOUTME: Skill administration tools - create and delete catalog skills.
// ABOUTME: Both are high-risk; callers reload the host to pick up changes.

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::SkillCatalog;
use crate::tool::{Tool, ToolResult};

/// Tool that persists a new skill to the catalog.
pub struct CreateSkillTool {
    catalog: SkillCatalog,
}

impl CreateSkillTool {
    pub fn new(catalog: SkillCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for CreateSkillTool {
    fn name(&self) -> &str {
        "create_skill"
    }

    fn description(&self) -> &str {
        "Create a new skill: JavaScript code with a run(args) entry function, stored under a normalized name. Reload the tool host to make it callable."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Skill name; normalized to lowercase and underscores"
                },
                "description": {
                    "type": "string",
                    "description": "What the skill does, shown to the planning loop"
                },
                "code": {
                    "type": "string",
                    "description": "JavaScript source defining a run(args) entry function"
                },
                "args_schema": {
                    "type": "object",
                    "description": "Optional JSON schema documenting the skill's arguments"
                }
            },
            "required": ["name", "description", "code"]
        })
    }

    fn requires_approval(&self, _params: &serde_json::Value) -> bool {
        true
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            name: String,
            description: String,
            code: String,
            #[serde(default)]
            args_schema: serde_json::Value,
        }
        let params: Params = serde_json::from_value(params)?;

        match self.catalog.save(
            &params.name,
            &params.description,
            &params.code,
            params.args_schema,
        ) {
            Ok(path) => Ok(ToolResult::text(format!(
                "Saved skill to {}. Reload to make it callable.",
                path.display()
            ))),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}

/// Tool that removes a skill from the catalog.
pub struct DeleteSkillTool {
    catalog: SkillCatalog,
}

impl DeleteSkillTool {
    pub fn new(catalog: SkillCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for DeleteSkillTool {
    fn name(&self) -> &str {
        "delete_skill"
    }

    fn description(&self) -> &str {
        "Delete a skill from the catalog by name. Reload the tool host to drop it from dispatch."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the skill to delete"
                }
            },
            "required": ["name"]
        })
    }

    fn requires_approval(&self, _params: &serde_json::Value) -> bool {
        true
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            name: String,
        }
        let params: Params = serde_json::from_value(params)?;

        match self.catalog.delete(&params.name) {
            Ok(()) => Ok(ToolResult::text(format!(
                "Deleted skill '{}'. Reload to drop it from dispatch.",
                params.name
            ))),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}
