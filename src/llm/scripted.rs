//! Scripted transport
//!
//! Replays a fixed queue of assistant turns (or failures) in order. Used to
//! drive the engine deterministically in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;

use super::provider::Transport;
use super::types::ToolDeclaration;
use crate::conversation::{ToolCall, Turn};

enum Step {
    Reply(Turn),
    Fail(String),
}

/// A transport that answers from a pre-recorded script
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    /// Length of the turn sequence seen by each request, in call order
    requests: Mutex<Vec<usize>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text assistant reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Step::Reply(Turn::assistant(text)))
    }

    /// Queue an assistant reply that requests tool calls
    pub fn reply_with_calls(self, text: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        self.push(Step::Reply(Turn::assistant_with_calls(text, calls)))
    }

    /// Queue a transport failure
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Step::Fail(message.into()))
    }

    fn push(self, step: Step) -> Self {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push_back(step);
        }
        self
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Turn-sequence length of every request received so far
    pub fn request_lengths(&self) -> Vec<usize> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of queued steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn complete(&self, turns: &[Turn], _tools: &[ToolDeclaration]) -> Result<Turn> {
        self.requests
            .lock()
            .map_err(|_| anyhow::anyhow!("scripted transport lock poisoned"))?
            .push(turns.len());

        let step = self
            .steps
            .lock()
            .map_err(|_| anyhow::anyhow!("scripted transport lock poisoned"))?
            .pop_front();

        match step {
            Some(Step::Reply(turn)) => Ok(turn),
            Some(Step::Fail(message)) => Err(anyhow::anyhow!(message)),
            None => anyhow::bail!("no more scripted responses"),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
