use std::path::PathBuf;

use clap::Parser;

use crate::agent::DEFAULT_MAX_ITERATIONS;

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "delegate-agent")]
#[command(author, version, about = "Chat with a tool-using model that can delegate to sub-agents")]
pub struct Cli {
    /// Model name (overrides LLM_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Directory that relative tool paths resolve against
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Maximum model requests per user message
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Directory for rolling log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["delegate-agent"]);
        assert_eq!(cli.model, None);
        assert_eq!(cli.workspace, PathBuf::from("."));
        assert_eq!(cli.max_iterations, 10);
        assert_eq!(cli.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "delegate-agent",
            "-m",
            "gpt-4o",
            "--workspace",
            "/tmp/project",
            "--max-iterations",
            "3",
        ]);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.workspace, PathBuf::from("/tmp/project"));
        assert_eq!(cli.max_iterations, 3);
    }
}
