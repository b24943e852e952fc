//! Conversation Engine
//!
//! Drives one conversation to a natural pause:
//! - Send the turn sequence and tool declarations to the transport
//! - Append the assistant turn
//! - Dispatch its tool calls in order, appending one tool turn per call
//! - Repeat until a turn has no tool calls or the iteration ceiling is hit
//!
//! The `run_agent` tool re-enters this loop with a fresh engine one level
//! deeper; only the sub-agent's assistant text crosses between levels.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::config::EngineConfig;
use super::events::{EngineEvent, LogSink};
use crate::conversation::Turn;
use crate::core::{DriveFailure, EngineError};
use crate::llm::Transport;
use crate::tools::{ToolContext, ToolRegistry};

/// Multi-turn conversation driver
///
/// # Example
///
/// ```ignore
/// let engine = ConversationEngine::standard(transport, EngineConfig::new("."));
/// let turns = engine.drive(vec![Turn::user("List the src directory")], None).await?;
/// ```
pub struct ConversationEngine {
    transport: Arc<dyn Transport>,
    tools: ToolRegistry,
    config: EngineConfig,
}

impl ConversationEngine {
    /// Create an engine with an explicit tool registry
    pub fn new(transport: Arc<dyn Transport>, tools: ToolRegistry, config: EngineConfig) -> Self {
        Self {
            transport,
            tools,
            config,
        }
    }

    /// Create an engine with the standard tool set
    pub fn standard(transport: Arc<dyn Transport>, config: EngineConfig) -> Self {
        let tools = ToolRegistry::standard(Arc::clone(&transport), &config);
        Self::new(transport, tools, config)
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drive the conversation until the model stops calling tools
    ///
    /// Returns the input turns followed by every turn appended during the
    /// drive. Hitting the iteration ceiling is not an error. On a transport
    /// failure the accumulated turns come back inside the [`DriveFailure`].
    pub async fn drive(
        &self,
        turns: Vec<Turn>,
        sink: Option<&dyn LogSink>,
    ) -> Result<Vec<Turn>, DriveFailure> {
        self.drive_with_cancel(turns, sink, &CancellationToken::new())
            .await
    }

    /// Like [`drive`](Self::drive), aborting an in-flight request when `cancel` fires
    pub async fn drive_with_cancel(
        &self,
        turns: Vec<Turn>,
        sink: Option<&dyn LogSink>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Turn>, DriveFailure> {
        self.drive_at_depth(turns, sink, cancel, 0).await
    }

    pub(crate) async fn drive_at_depth(
        &self,
        turns: Vec<Turn>,
        sink: Option<&dyn LogSink>,
        cancel: &CancellationToken,
        depth: usize,
    ) -> Result<Vec<Turn>, DriveFailure> {
        let invocation = Uuid::new_v4();
        let span = tracing::info_span!("drive", %invocation, depth);

        self.run_loop(turns, sink, cancel, depth)
            .instrument(span)
            .await
    }

    async fn run_loop(
        &self,
        mut turns: Vec<Turn>,
        sink: Option<&dyn LogSink>,
        cancel: &CancellationToken,
        depth: usize,
    ) -> Result<Vec<Turn>, DriveFailure> {
        if turns.is_empty() {
            tracing::warn!("[Engine] Driving an empty conversation");
        }

        let declarations = self.tools.declarations();
        let emit = |event: EngineEvent| {
            if let Some(sink) = sink {
                sink.log(&event);
            }
        };

        for iteration in 1..=self.config.max_iterations {
            tracing::info!(
                "[Engine] Calling transport with {} turns (iteration {})",
                turns.len(),
                iteration
            );
            emit(EngineEvent::Request { depth, iteration });

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.transport.complete(&turns, &declarations) => Some(result),
            };

            let reply = match outcome {
                Some(Ok(reply)) => reply,
                Some(Err(cause)) => {
                    tracing::error!("[Engine] Transport failed at iteration {}: {:#}", iteration, cause);
                    return Err(DriveFailure {
                        turns,
                        error: EngineError::Transport { iteration, cause },
                    });
                }
                None => {
                    tracing::warn!("[Engine] Cancelled at iteration {}", iteration);
                    return Err(DriveFailure {
                        turns,
                        error: EngineError::Cancelled { iteration },
                    });
                }
            };

            if !reply.text.is_empty() {
                emit(EngineEvent::AssistantText {
                    depth,
                    text: reply.text.clone(),
                });
            }

            let calls = reply.tool_calls.clone();
            turns.push(reply);

            if calls.is_empty() {
                tracing::info!("[Engine] No tool calls, conversation paused after {} iterations", iteration);
                return Ok(turns);
            }

            tracing::info!("[Engine] Dispatching {} tool calls", calls.len());
            let ctx = ToolContext {
                sink,
                cancel,
                depth,
            };
            for call in &calls {
                emit(EngineEvent::ToolCall {
                    depth,
                    name: call.name.clone(),
                });
                let result = self.tools.dispatch(call, &ctx).await;
                turns.push(result);
            }
        }

        tracing::warn!(
            "[Engine] Max iterations ({}) reached",
            self.config.max_iterations
        );
        emit(EngineEvent::IterationLimit {
            depth,
            limit: self.config.max_iterations,
        });

        Ok(turns)
    }
}
