//! Read tool for reading files
//!
//! Returns the whole file content as text.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::tool::{parse_arguments, resolve_path, Tool, ToolContext};
use crate::core::ToolError;
use crate::llm::{ToolDeclaration, ToolInputSchema};

/// Read tool for reading files
pub struct ReadFileTool {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

/// Input for the read tool
#[derive(Debug, Deserialize)]
struct ReadFileInput {
    /// The relative path of a file in the working directory
    path: String,
}

impl ReadFileTool {
    /// Create a new read tool rooted at `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a given relative file path. Use this when you want to see what's inside a file. Do not use this with directory names."
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: ToolInputSchema::new()
                .with_properties(json!({
                    "path": {
                        "type": "string",
                        "description": "The relative path of a file in the working directory."
                    }
                }))
                .with_required(&["path"]),
        }
    }

    async fn execute(&self, arguments: &str, _ctx: &ToolContext<'_>) -> Result<String, ToolError> {
        let input: ReadFileInput = parse_arguments(arguments)?;
        let path = resolve_path(&self.base_dir, &input.path);
        tracing::info!("Reading file: {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(ToolError::ReadFile)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
