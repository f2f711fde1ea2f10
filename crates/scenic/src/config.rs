//! Configuration types for Scenic compilation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and output settings.
//! - [`RenderConfig`] - Controls the compiler, e.g. a frozen timestamp base.
//! - [`OutputConfig`] - Controls how the scene document is serialized.
//!
//! # Example
//!
//! ```
//! # use scenic::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.output().pretty());
//! assert_eq!(config.render().start_time(), None);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, output: OutputConfig) -> Self {
        Self { render, output }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the render configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Replaces the output configuration.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}

/// Compiler configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Base of the synthetic `updated` timestamps in milliseconds since the
    /// Unix epoch. Unset reads the wall clock once per compilation.
    #[serde(default)]
    start_time: Option<i64>,
}

impl RenderConfig {
    pub fn new(start_time: Option<i64>) -> Self {
        Self { start_time }
    }

    /// Returns the frozen timestamp base, if any.
    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }
}

/// Scene serialization configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print the scene with two-space indentation.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.render().start_time(), None);
        assert!(config.output().pretty());
    }

    #[test]
    fn test_sections_deserialize() {
        let config: AppConfig = serde_json::from_str(
            r#"{"render": {"start_time": 1700000000000}, "output": {"pretty": false}}"#,
        )
        .unwrap();

        assert_eq!(config.render().start_time(), Some(1_700_000_000_000));
        assert!(!config.output().pretty());
    }
}
