//! Configuration file loading for the CLI
//!
//! This module finds and loads the TOML configuration file from an
//! explicit path, the local directory or the platform config directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use scenic::{ScenicError, config::AppConfig};

const LOCAL_CONFIG: &str = "scenic/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ScenicError {
    fn from(err: ConfigError) -> Self {
        ScenicError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`scenic/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if an explicit path does not exist, or if a found file
/// cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ScenicError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = LOCAL_CONFIG; "Loading configuration from local path");
        return load_config_file(local_config);
    }

    match ProjectDirs::from("org", "scenic", "scenic") {
        Some(dirs) => {
            let system_config = dirs.config_dir().join("config.toml");
            if system_config.exists() {
                info!(path = system_config.display().to_string(); "Loading configuration from system path");
                return load_config_file(&system_config);
            }
            debug!(path = system_config.display().to_string(); "System configuration file not found");
        }
        None => debug!("Could not determine platform-specific config directory"),
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: &Path) -> Result<AppConfig, ScenicError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    debug!(
        start_time:? = config.render().start_time(),
        pretty = config.output().pretty();
        "Configuration loaded"
    );
    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [render]
            start_time = 1700000000000

            [output]
            pretty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.render().start_time(), Some(1_700_000_000_000));
        assert!(!config.output().pretty());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.render().start_time(), None);
        assert!(config.output().pretty());
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = parse_config("[output]\npretty = \"yes\"").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = load_config(Some("does/not/exist/scenic.toml")).unwrap_err();

        assert!(err.to_string().contains("Missing configuration file"));
    }
}
