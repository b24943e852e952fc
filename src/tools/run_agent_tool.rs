//! Delegation tool
//!
//! Runs a task in a fresh sub-agent: a new engine with its own turn sequence,
//! iteration counter and tool registry. The caller gets back the task and
//! every piece of text the sub-agent said along the way, ending with its final
//! answer. Its tool calls and results stay inside the sub-agent.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::registry::ToolRegistry;
use super::tool::{parse_arguments, Tool, ToolContext};
use crate::agent::{ConversationEngine, EngineConfig};
use crate::conversation::{assistant_texts, Turn};
use crate::core::ToolError;
use crate::llm::{ToolDeclaration, ToolInputSchema, Transport};

/// Tool that delegates a task to a nested conversation engine
pub struct RunAgentTool {
    transport: Arc<dyn Transport>,
    config: EngineConfig,
}

/// Input for the delegation tool
#[derive(Debug, Deserialize)]
struct RunAgentInput {
    /// Self-contained description of the sub-task
    task: String,
}

impl RunAgentTool {
    /// Sub-agents talk to `transport` and use the same engine settings
    pub fn new(transport: Arc<dyn Transport>, config: EngineConfig) -> Self {
        Self { transport, config }
    }
}

#[async_trait]
impl Tool for RunAgentTool {
    fn name(&self) -> &str {
        "run_agent"
    }

    fn description(&self) -> &str {
        "Run a sub-agent to complete a self-contained task. The sub-agent has the same tools, \
        starts with no knowledge of this conversation, and returns what it said while working."
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: ToolInputSchema::new()
                .with_properties(json!({
                    "task": {
                        "type": "string",
                        "description": "The task for the sub-agent, including all context it needs."
                    }
                }))
                .with_required(&["task"]),
        }
    }

    async fn execute(&self, arguments: &str, ctx: &ToolContext<'_>) -> Result<String, ToolError> {
        let input: RunAgentInput = parse_arguments(arguments)?;
        tracing::info!("[RunAgent] Starting sub-agent at depth {}", ctx.depth + 1);
        tracing::debug!("[RunAgent] Task: {}", input.task);

        let tools = ToolRegistry::standard(Arc::clone(&self.transport), &self.config);
        let engine = ConversationEngine::new(Arc::clone(&self.transport), tools, self.config.clone());

        let turns = engine
            .drive_at_depth(vec![Turn::user(&input.task)], ctx.sink, ctx.cancel, ctx.depth + 1)
            .await
            .map_err(|failure| {
                tracing::warn!("[RunAgent] Sub-agent failed: {}", failure.error);
                ToolError::Agent(failure.error)
            })?;

        tracing::info!("[RunAgent] Sub-agent finished after {} turns", turns.len());

        Ok(format!(
            "Agent task: {}\n\n{}",
            input.task,
            assistant_texts(&turns).join("\n")
        ))
    }
}
