//! Conversation data model
//!
//! A conversation is an ordered, append-only sequence of [`Turn`]s.

mod turn;

pub use turn::{assistant_texts, Role, ToolCall, Turn};
