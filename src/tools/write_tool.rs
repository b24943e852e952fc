//! Write tool for creating/writing files
//!
//! Creates missing parent directories, then writes or overwrites the file.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::tool::{parse_arguments, resolve_path, Tool, ToolContext};
use crate::core::ToolError;
use crate::llm::{ToolDeclaration, ToolInputSchema};

/// Fixed text returned after a successful write
pub const WRITE_SUCCESS: &str = "File written successfully.";

/// Write tool for creating files
pub struct WriteFileTool {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

/// Input for the write tool
#[derive(Debug, Deserialize)]
struct WriteFileInput {
    /// The relative path of a file in the working directory
    path: String,
    /// The content to write to the file
    content: String,
}

impl WriteFileTool {
    /// Create a new write tool rooted at `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl Default for WriteFileTool {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_to_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, overwriting it if it exists."
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
                    },
                    "content": {
                        "type": "string",
                        "description": "The content to write to the file. This will overwrite the file if it exists."
                    }
                }))
                .with_required(&["path", "content"]),
        }
    }

    async fn execute(&self, arguments: &str, _ctx: &ToolContext<'_>) -> Result<String, ToolError> {
        let input: WriteFileInput = parse_arguments(arguments)?;
        let path = resolve_path(&self.base_dir, &input.path);
        tracing::info!("Writing file: {}", path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(ToolError::CreateDir)?;
        }

        tokio::fs::write(&path, input.content.as_bytes())
            .await
            .map_err(ToolError::WriteFile)?;

        Ok(WRITE_SUCCESS.to_string())
    }
}
