//! Transport trait
//!
//! Abstracts the model endpoint so the conversation engine can be driven by
//! the HTTP client in production and by a scripted transport in tests.

use anyhow::Result;

use super::types::ToolDeclaration;
use crate::conversation::Turn;

/// A single request/response exchange with the model.
///
/// Implementations receive the full turn sequence and the fixed tool
/// declarations, and return exactly one assistant turn. Retries, if any,
/// belong to the implementation.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send the conversation and get the next assistant turn.
    async fn complete(&self, turns: &[Turn], tools: &[ToolDeclaration]) -> Result<Turn>;

    /// Get the current model name.
    fn model(&self) -> &str;
}
