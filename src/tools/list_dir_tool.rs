//! List tool for directory contents
//!
//! Entries are returned one per line in the order the file system yields
//! them; neither mode sorts. Recursive mode walks depth-first, listing each
//! directory before its children, and does not follow symlinked directories.
//! Recursively listing a regular file yields an empty listing.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::tool::{parse_arguments, resolve_path, Tool, ToolContext};
use crate::core::ToolError;
use crate::llm::{ToolDeclaration, ToolInputSchema};

/// Directory listing tool
pub struct ListDirTool {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

/// Input for the list tool
#[derive(Debug, Deserialize)]
struct ListDirInput {
    /// The relative path of a directory in the working directory
    path: String,
    /// Whether to list the directory recursively
    #[serde(default)]
    recursive: bool,
}

impl ListDirTool {
    /// Create a new list tool rooted at `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    async fn list(&self, dir: &Path) -> Result<String, ToolError> {
        let mut listing = String::new();
        let mut entries = tokio::fs::read_dir(dir).await.map_err(ToolError::ReadDir)?;
        while let Some(entry) = entries.next_entry().await.map_err(ToolError::ReadDir)? {
            listing.push_str(&entry.file_name().to_string_lossy());
            listing.push('\n');
        }
        Ok(listing)
    }

    async fn list_recursive(&self, root: &Path) -> Result<String, ToolError> {
        walk(root).await.map_err(ToolError::WalkDir)
    }
}

/// List every descendant of `root`, relative to it, in pre-order
///
/// One open directory handle per level is kept on an explicit stack.
async fn walk(root: &Path) -> io::Result<String> {
    let mut listing = String::new();
    if !tokio::fs::metadata(root).await?.is_dir() {
        return Ok(listing);
    }

    let mut stack = vec![tokio::fs::read_dir(root).await?];
    while let Some(entries) = stack.last_mut() {
        let Some(entry) = entries.next_entry().await? else {
            stack.pop();
            continue;
        };

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        listing.push_str(&relative.to_string_lossy());
        listing.push('\n');

        if entry.file_type().await?.is_dir() {
            stack.push(tokio::fs::read_dir(&path).await?);
        }
    }
    Ok(listing)
}

impl Default for ListDirTool {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}

#[async_trait]
impl Tool for ListDirTool {
    fn name(&self) -> &str {
        "list_dir"
    }

    fn description(&self) -> &str {
        "List the contents of a given relative directory path."
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: ToolInputSchema::new()
                .with_properties(json!({
                    "path": {
                        "type": "string",
                        "description": "The relative path of a directory in the working directory."
                    },
                    "recursive": {
                        "type": "boolean",
                        "description": "Whether to list the directory recursively"
                    }
                }))
                .with_required(&["path"]),
        }
    }

    async fn execute(&self, arguments: &str, _ctx: &ToolContext<'_>) -> Result<String, ToolError> {
        let input: ListDirInput = parse_arguments(arguments)?;
        let dir = resolve_path(&self.base_dir, &input.path);
        tracing::info!(
            "Listing directory: {} (recursive: {})",
            dir.display(),
            input.recursive
        );

        if input.recursive {
            self.list_recursive(&dir).await
        } else {
            self.list(&dir).await
        }
    }
}
