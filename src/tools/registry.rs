//! Tool registry for managing available tools
//!
//! The registry is built once per engine and is read-only afterwards.
//! Declarations are advertised in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use super::list_dir_tool::ListDirTool;
use super::read_tool::ReadFileTool;
use super::run_agent_tool::RunAgentTool;
use super::tool::{Tool, ToolContext, ToolResult};
use super::write_tool::WriteFileTool;
use crate::agent::EngineConfig;
use crate::conversation::{ToolCall, Turn};
use crate::llm::{ToolDeclaration, Transport};

/// Registry that holds all available tools
pub struct ToolRegistry {
    /// Tools in registration order
    tools: Vec<Arc<dyn Tool>>,

    /// Name to position in `tools`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The standard tool set: `read_file`, `list_dir`, `write_to_file`, `run_agent`
    pub fn standard(transport: Arc<dyn Transport>, config: &EngineConfig) -> Self {
        let root = &config.workspace_root;

        let mut registry = Self::new();
        registry.register(ReadFileTool::with_base_dir(root));
        registry.register(ListDirTool::with_base_dir(root));
        registry.register(WriteFileTool::with_base_dir(root));
        registry.register(RunAgentTool::new(transport, config.clone()));
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        tracing::debug!("[ToolRegistry] Registering tool: {}", name);

        match self.index.get(&name) {
            Some(&position) => self.tools[position] = Arc::new(tool),
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(Arc::new(tool));
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    /// Get all tool declarations, in registration order
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(|t| t.declaration()).collect()
    }

    /// Run one tool call and produce exactly one tool turn for it
    ///
    /// Unknown tools, bad arguments and tool failures all become the text of
    /// the returned turn.
    pub async fn dispatch(&self, call: &ToolCall, ctx: &ToolContext<'_>) -> Turn {
        let result = match self.get(&call.name) {
            Some(tool) => {
                tracing::info!("[ToolRegistry] Executing tool: {} ({})", call.name, call.id);
                tracing::debug!("[ToolRegistry] Arguments: {}", call.arguments);
                ToolResult::from(tool.execute(&call.arguments, ctx).await)
            }
            None => ToolResult::error(format!("Unknown tool: {}", call.name)),
        };

        if result.is_error {
            tracing::warn!("[ToolRegistry] Tool {} reported: {}", call.name, result.output);
        } else {
            tracing::debug!(
                "[ToolRegistry] Tool {} completed with {} bytes",
                call.name,
                result.output.len()
            );
        }

        Turn::tool(&call.id, result.output)
    }

    /// Get the list of tool names, in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::llm::ScriptedTransport;
    use serde_json::json;
    use tempfile::tempdir;
    use tokio_util::sync::CancellationToken;

    fn standard_in(dir: &std::path::Path) -> ToolRegistry {
        ToolRegistry::standard(Arc::new(ScriptedTransport::new()), &EngineConfig::new(dir))
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_standard_tools_in_order() {
        let dir = tempdir().unwrap();
        let registry = standard_in(dir.path());

        assert_eq!(
            registry.tool_names(),
            vec!["read_file", "list_dir", "write_to_file", "run_agent"]
        );
        let names: Vec<_> = registry.declarations().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["read_file", "list_dir", "write_to_file", "run_agent"]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(ReadFileTool::with_base_dir("/a"));
        registry.register(ListDirTool::default());
        registry.register(ReadFileTool::with_base_dir("/b"));

        assert_eq!(registry.tool_names(), vec!["read_file", "list_dir"]);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let dir = tempdir().unwrap();
        let registry = standard_in(dir.path());
        let cancel = CancellationToken::new();
        let ctx = ToolContext { sink: None, cancel: &cancel, depth: 0 };

        let call = ToolCall::new("call-unknown", "delete_everything", "{}");
        let turn = registry.dispatch(&call, &ctx).await;

        assert_eq!(turn.role, Role::Tool);
        assert_eq!(turn.text, "Unknown tool: delete_everything");
        assert_eq!(turn.tool_call_id.as_deref(), Some("call-unknown"));
    }

    #[tokio::test]
    async fn test_dispatch_absorbs_malformed_arguments() {
        let dir = tempdir().unwrap();
        let registry = standard_in(dir.path());
        let cancel = CancellationToken::new();
        let ctx = ToolContext { sink: None, cancel: &cancel, depth: 0 };

        for (id, name, args) in [
            ("c1", "read_file", "{not json"),
            ("c2", "list_dir", r#"{"recursive": true}"#),
            ("c3", "write_to_file", r#"{"path": 42, "content": "x"}"#),
            ("c4", "run_agent", ""),
        ] {
            let turn = registry.dispatch(&ToolCall::new(id, name, args), &ctx).await;
            assert!(turn.text.starts_with("Invalid arguments:"), "{}: {}", name, turn.text);
            assert_eq!(turn.tool_call_id.as_deref(), Some(id));
        }
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let registry = standard_in(dir.path());
        let cancel = CancellationToken::new();
        let ctx = ToolContext { sink: None, cancel: &cancel, depth: 0 };

        let content = "first line\nsecond line with ünïcode\n";
        let write = json!({ "path": "new/dir/file.txt", "content": content });
        let turn = registry
            .dispatch(&ToolCall::new("w", "write_to_file", write.to_string()), &ctx)
            .await;
        assert_eq!(turn.text, "File written successfully.");

        let read = json!({ "path": "new/dir/file.txt" });
        let turn = registry
            .dispatch(&ToolCall::new("r", "read_file", read.to_string()), &ctx)
            .await;
        assert_eq!(turn.text, content);
        assert_eq!(turn.tool_call_id.as_deref(), Some("r"));
    }
}
