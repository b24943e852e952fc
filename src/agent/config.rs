//! Engine Configuration
//!
//! Configuration options for the ConversationEngine.

use std::path::PathBuf;

/// Default ceiling on transport calls per drive
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Configuration for a ConversationEngine
///
/// ```ignore
/// let config = EngineConfig::new("/path/to/project")
///     .with_max_iterations(10);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of transport calls in one drive (prevents runaway loops)
    pub max_iterations: usize,

    /// Directory that relative tool paths resolve against
    pub workspace_root: PathBuf,
}

impl EngineConfig {
    /// Create a configuration rooted at `workspace_root`
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            workspace_root: workspace_root.into(),
        }
    }

    /// Set maximum transport calls per drive
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.workspace_root, PathBuf::from("."));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new("/tmp/work").with_max_iterations(3);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.workspace_root, PathBuf::from("/tmp/work"));
    }
}
