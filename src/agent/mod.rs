//! Conversation engine
//!
//! This module provides:
//! - `ConversationEngine` - The drive loop over transport and tools
//! - `EngineConfig` - Iteration ceiling and workspace root
//! - `EngineEvent` / `LogSink` - Observation of a running drive

pub mod config;
pub mod engine;
pub mod events;

pub use config::{EngineConfig, DEFAULT_MAX_ITERATIONS};
pub use engine::ConversationEngine;
pub use events::{EngineEvent, LogSink};
