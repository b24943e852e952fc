//! Tool system for the agent
//!
//! This module provides:
//! - `Tool` trait - Interface for implementing tools
//! - `ToolResult` / `ToolContext` - Execution result and per-call state
//! - `ToolRegistry` - Name-to-tool mapping and dispatch
//! - The built-in tools: `read_file`, `list_dir`, `write_to_file`, `run_agent`

mod list_dir_tool;
mod read_tool;
mod registry;
mod run_agent_tool;
mod tool;
mod write_tool;

pub use list_dir_tool::ListDirTool;
pub use read_tool::ReadFileTool;
pub use registry::ToolRegistry;
pub use run_agent_tool::RunAgentTool;
pub use tool::{parse_arguments, resolve_path, Tool, ToolContext, ToolResult};
pub use write_tool::{WriteFileTool, WRITE_SUCCESS};
