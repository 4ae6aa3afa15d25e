//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\album-tagger\config.toml
//! - macOS: ~/Library/Application Support/album-tagger/config.toml
//! - Linux: ~/.config/album-tagger/config.toml
//!
//! A different file can be passed with `--config`. Every section falls back
//! to defaults, and command-line flags override what the file says. The
//! loaded [`Config`] is passed explicitly to the parts that need it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::matching::assignment::DEFAULT_MAX_PASSES;
use crate::source::discogs::USER_AGENT;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Metadata source settings
    pub source: SourceConfig,

    /// Matching engine settings
    pub matching: MatchingConfig,

    /// File discovery settings
    pub scan: ScanConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Discogs personal access token (raises the rate limit)
    pub discogs_token: Option<String>,
}

/// Metadata source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Matching engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Passes over unconfirmed tracks before giving up
    pub max_passes: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// File discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions considered audio files (lowercase, no dot)
    pub extensions: Vec<String>,

    /// Skip directory entries whose extension is not listed
    pub filter_extensions: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "ogg", "m4a", "wav"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            filter_extensions: true,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("album-tagger"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path
///
/// Unlike [`load`], a missing or malformed file is an error.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        crate::error::Error::config(e.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[source]"));
        assert!(toml.contains("[matching]"));
        assert!(toml.contains("[scan]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.discogs_token = Some("test-token-123".to_string());
        config.matching.max_passes = 7;
        config.scan.filter_extensions = false;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(
            parsed.credentials.discogs_token,
            Some("test-token-123".to_string())
        );
        assert_eq!(parsed.matching.max_passes, 7);
        assert!(!parsed.scan.filter_extensions);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[matching]
max_passes = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.matching.max_passes, 5);
        assert!(config.credentials.discogs_token.is_none());
        assert!(config.scan.filter_extensions);
        assert!(config.scan.extensions.contains(&"mp3".to_string()));
        assert!(config.source.user_agent.starts_with("AlbumTagger/"));
    }

    #[test]
    fn test_load_from_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scan.extensions = vec!["opus".to_string()];
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.scan.extensions, vec!["opus".to_string()]);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn test_load_from_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "matching = 3 = 4").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Parse(_, _))));
    }
}
