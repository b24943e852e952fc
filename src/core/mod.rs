//! Core types shared across the crate
//!
//! - `EngineError` / `DriveFailure` - Hard failures of a conversation drive
//! - `ToolError` - Conditions reported back to the model as tool output
//! - `ConfigError` - Startup configuration failures

pub mod error;

pub use error::{ConfigError, DriveFailure, EngineError, ToolError};
