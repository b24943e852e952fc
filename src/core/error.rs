//! Error types
//!
//! Only transport failures cross the engine boundary as errors. Tool failures
//! are [`ToolError`]s whose display text becomes the content of a tool turn.

use thiserror::Error;

use crate::conversation::Turn;

/// Errors that end a single `drive` call
#[derive(Error, Debug)]
pub enum EngineError {
    /// The transport request failed; iterations are 1-based
    #[error("error creating chat completion (iteration {iteration}): {cause:#}")]
    Transport {
        iteration: usize,
        cause: anyhow::Error,
    },

    /// The caller cancelled while a request was in flight
    #[error("conversation cancelled (iteration {iteration})")]
    Cancelled { iteration: usize },
}

impl EngineError {
    pub fn iteration(&self) -> usize {
        match self {
            EngineError::Transport { iteration, .. } | EngineError::Cancelled { iteration } => {
                *iteration
            }
        }
    }
}

/// Failure of a `drive` call, together with every turn accumulated before it
#[derive(Error, Debug)]
#[error("{error}")]
pub struct DriveFailure {
    /// The sequence up to the failure point, still valid to replay
    pub turns: Vec<Turn>,
    pub error: EngineError,
}

/// Conditions a tool reports back to the model instead of failing
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    #[error("Error reading file: {0}")]
    ReadFile(std::io::Error),

    #[error("Error reading directory: {0}")]
    ReadDir(std::io::Error),

    #[error("Error walking directory: {0}")]
    WalkDir(std::io::Error),

    #[error("Error creating directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Error writing file: {0}")]
    WriteFile(std::io::Error),

    #[error("Error running agent: {0}")]
    Agent(EngineError),
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_prefixes() {
        let io_err = || std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");

        assert_eq!(
            ToolError::ReadFile(io_err()).to_string(),
            "Error reading file: file not found"
        );
        assert!(ToolError::ReadDir(io_err())
            .to_string()
            .starts_with("Error reading directory:"));
        assert!(ToolError::WalkDir(io_err())
            .to_string()
            .starts_with("Error walking directory:"));
        assert!(ToolError::CreateDir(io_err())
            .to_string()
            .starts_with("Error creating directory:"));
        assert!(ToolError::WriteFile(io_err())
            .to_string()
            .starts_with("Error writing file:"));
    }

    #[test]
    fn test_invalid_arguments_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ToolError = json_err.into();
        assert!(err.to_string().starts_with("Invalid arguments: "));
    }

    #[test]
    fn test_engine_error_names_iteration() {
        let err = EngineError::Transport {
            iteration: 3,
            cause: anyhow::anyhow!("connection refused"),
        };
        assert_eq!(err.iteration(), 3);
        assert_eq!(
            err.to_string(),
            "error creating chat completion (iteration 3): connection refused"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnv("LLM_ENDPOINT");
        assert_eq!(err.to_string(), "LLM_ENDPOINT environment variable is required");
    }
}
