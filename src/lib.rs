//! A terminal chat agent whose model can read, list and write files in a
//! workspace and hand sub-tasks to nested copies of itself.

pub mod agent;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod llm;
pub mod logging;
pub mod tools;
