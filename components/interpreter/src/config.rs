//! Session configuration

use serde::{Deserialize, Serialize};

/// Options fixed when a dialogue session is created
///
/// # Example
///
/// ```
/// use interpreter::RunnerConfig;
///
/// let config = RunnerConfig::new()
///     .with_start_node("Intro")
///     .with_autostart(false);
/// assert_eq!(config.start_node, "Intro");
/// assert!(!config.line_spacing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Node pushed onto the stack before the first resume
    pub start_node: String,
    /// Resume immediately on construction
    pub autostart: bool,
    /// Insert blank lines for gaps between consecutive source lines
    pub line_spacing: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            start_node: "Start".to_string(),
            autostart: true,
            line_spacing: false,
        }
    }
}

impl RunnerConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start node
    pub fn with_start_node(mut self, node: impl Into<String>) -> Self {
        self.start_node = node.into();
        self
    }

    /// Enable or disable autostart
    pub fn with_autostart(mut self, enabled: bool) -> Self {
        self.autostart = enabled;
        self
    }

    /// Enable or disable line spacing
    pub fn with_line_spacing(mut self, enabled: bool) -> Self {
        self.line_spacing = enabled;
        self
    }
}
