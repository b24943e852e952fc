//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::agent::LogSink;
use crate::core::ToolError;
use crate::llm::ToolDeclaration;

/// Result of executing a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The output of the tool
    pub output: String,
    /// Whether the tool execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: message.into(),
            is_error: true,
        }
    }
}

impl From<Result<String, ToolError>> for ToolResult {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(output) => ToolResult::success(output),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Per-call state handed to a tool by the engine that dispatched it
pub struct ToolContext<'a> {
    /// Observer of the dispatching engine, if any
    pub sink: Option<&'a dyn LogSink>,
    /// Cancellation shared with the dispatching engine
    pub cancel: &'a CancellationToken,
    /// Nesting level of the dispatching engine (0 = top level)
    pub depth: usize,
}

/// Trait for tools that the agent can use
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Get the declaration advertised to the model
    fn declaration(&self) -> ToolDeclaration;

    /// Execute the tool with the raw JSON arguments of one call
    ///
    /// Errors are reported to the model as the text of the tool turn.
    async fn execute(&self, arguments: &str, ctx: &ToolContext<'_>) -> Result<String, ToolError>;
}

/// Decode a tool's raw JSON arguments into its input type
pub fn parse_arguments<T: DeserializeOwned>(arguments: &str) -> Result<T, ToolError> {
    Ok(serde_json::from_str(arguments)?)
}

/// Resolve a path (handle both absolute and relative)
pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
