//! Runtime settings
//!
//! Connection details come from the environment, everything else from the
//! command line.

use std::path::PathBuf;

use crate::agent::EngineConfig;
use crate::cli::Cli;
use crate::core::ConfigError;

/// Model used when neither `--model` nor `LLM_MODEL` is set
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";

pub const ENDPOINT_VAR: &str = "LLM_ENDPOINT";
pub const KEY_VAR: &str = "LLM_KEY";
pub const MODEL_VAR: &str = "LLM_MODEL";

/// Everything the binary needs to start a session
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub engine: EngineConfig,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from the command line and the process environment
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolve settings with an explicit environment lookup
    pub fn resolve_with<F>(cli: &Cli, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            env(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };

        let endpoint = required(ENDPOINT_VAR)?;
        let api_key = required(KEY_VAR)?;
        let model = resolve_model(cli.model.as_deref(), env(MODEL_VAR).as_deref());

        let engine = EngineConfig::new(&cli.workspace).with_max_iterations(cli.max_iterations);

        Ok(Self {
            endpoint,
            api_key,
            model,
            engine,
            log_dir: cli.log_dir.clone(),
        })
    }
}

/// Pick the model: command line, then environment, then [`DEFAULT_MODEL`]
///
/// Blank values count as unset.
pub fn resolve_model(cli: Option<&str>, env: Option<&str>) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MODEL)
        .to_string()
}
