//! Configuration Management Module
//!
//! Layered configuration for the chat endpoint and local output:
//! built-in defaults, then an optional TOML file, then `YOUCHAT_*`
//! environment variables. CLI flags are applied last by the caller.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default chat endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.betterapi.net/youdotcom/chat";

/// Static key sent as the `key` query parameter
pub const DEFAULT_API_KEY: &str = "site";

/// Maximum words accepted from a prompt or selection
pub const DEFAULT_MAX_WORDS: usize = 500;

/// Seconds the CLI keeps serving copied text on X11/Wayland
pub const DEFAULT_CLIPBOARD_HOLD_SECS: u64 = 10;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "YOUCHAT_CONFIG";

const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Endpoint receiving the `message` and `key` query parameters
    pub base_url: String,
    /// Value of the `key` query parameter
    pub api_key: String,
    /// Word limit for prompt and selection payloads
    pub max_words: usize,
    /// HTML-entity decode the body before parsing it as JSON
    pub unescape_entities: bool,
    /// Request timeout; `None` keeps the HTTP client default
    pub timeout_secs: Option<u64>,
    /// Upper bound on how long a copy keeps the process alive; 0 disables
    pub clipboard_hold_secs: u64,
    /// Directory receiving generated panel documents
    pub panel_dir: PathBuf,
    /// Directory receiving rolling log files
    pub log_dir: PathBuf,
    /// Default tracing filter directive
    pub log_level: String,
    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Environment variables that overrode file values
    #[serde(skip)]
    pub env_overrides: Vec<&'static str>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("youchat");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            max_words: DEFAULT_MAX_WORDS,
            unescape_entities: true,
            timeout_secs: None,
            clipboard_hold_secs: DEFAULT_CLIPBOARD_HOLD_SECS,
            panel_dir: data_dir.join("panels"),
            log_dir: data_dir.join("logs"),
            log_level: "info".to_string(),
            source: None,
            env_overrides: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// Lookup order for the file: `explicit` → `$YOUCHAT_CONFIG` →
    /// `<config_dir>/youchat/config.toml`. A missing file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::resolve_path(),
        };

        let mut config = match path {
            Some(ref p) if p.exists() => Self::from_file(p)?,
            Some(ref p) if explicit.is_some() => {
                return Err(anyhow!("Configuration file not found: {:?}", p));
            }
            _ => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Default config file location
    fn resolve_path() -> Option<PathBuf> {
        if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|d| d.join("youchat").join(CONFIG_FILE))
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse TOML text; unspecified keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("YOUCHAT_BASE_URL") {
            self.env_overrides.push("YOUCHAT_BASE_URL");
            self.base_url = base_url;
            debug!("Applied env override for base URL");
        }

        if let Some(api_key) = lookup("YOUCHAT_API_KEY") {
            self.env_overrides.push("YOUCHAT_API_KEY");
            self.api_key = api_key;
            debug!("Applied env override for API key");
        }

        if let Some(max_words) = lookup("YOUCHAT_MAX_WORDS") {
            self.env_overrides.push("YOUCHAT_MAX_WORDS");
            self.max_words = max_words
                .parse()
                .map_err(|e| anyhow!("Invalid YOUCHAT_MAX_WORDS '{}': {}", max_words, e))?;
            debug!("Applied env override for max words");
        }

        if let Some(flag) = lookup("YOUCHAT_UNESCAPE_ENTITIES") {
            self.env_overrides.push("YOUCHAT_UNESCAPE_ENTITIES");
            self.unescape_entities = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
            debug!("Applied env override for entity unescaping");
        }

        if let Some(timeout) = lookup("YOUCHAT_TIMEOUT_SECS") {
            self.env_overrides.push("YOUCHAT_TIMEOUT_SECS");
            let secs = timeout
                .parse()
                .map_err(|e| anyhow!("Invalid YOUCHAT_TIMEOUT_SECS '{}': {}", timeout, e))?;
            self.timeout_secs = Some(secs);
            debug!("Applied env override for timeout");
        }

        if let Some(hold) = lookup("YOUCHAT_CLIPBOARD_HOLD_SECS") {
            self.env_overrides.push("YOUCHAT_CLIPBOARD_HOLD_SECS");
            self.clipboard_hold_secs = hold
                .parse()
                .map_err(|e| anyhow!("Invalid YOUCHAT_CLIPBOARD_HOLD_SECS '{}': {}", hold, e))?;
            debug!("Applied env override for clipboard hold");
        }

        if let Some(dir) = lookup("YOUCHAT_PANEL_DIR") {
            self.env_overrides.push("YOUCHAT_PANEL_DIR");
            self.panel_dir = PathBuf::from(dir);
            debug!("Applied env override for panel directory");
        }

        if let Some(dir) = lookup("YOUCHAT_LOG_DIR") {
            self.env_overrides.push("YOUCHAT_LOG_DIR");
            self.log_dir = PathBuf::from(dir);
            debug!("Applied env override for log directory");
        }

        if let Some(level) = lookup("YOUCHAT_LOG_LEVEL") {
            self.env_overrides.push("YOUCHAT_LOG_LEVEL");
            self.log_level = level;
            debug!("Applied env override for log level");
        }

        Ok(())
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("base_url must not be empty"));
        }
        if self.max_words == 0 {
            return Err(anyhow!("max_words must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_endpoint_contract() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, "site");
        assert_eq!(config.max_words, 500);
        assert!(config.unescape_entities);
        assert!(config.timeout_secs.is_none());
        assert_eq!(config.clipboard_hold_secs, DEFAULT_CLIPBOARD_HOLD_SECS);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("max_words = 42\n").unwrap();
        assert_eq!(config.max_words, 42);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(AppConfig::from_toml_str("max_words = \"many\"").is_err());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("YOUCHAT_BASE_URL", "http://127.0.0.1:9/chat"),
            ("YOUCHAT_MAX_WORDS", "10"),
            ("YOUCHAT_UNESCAPE_ENTITIES", "false"),
            ("YOUCHAT_TIMEOUT_SECS", "5"),
            ("YOUCHAT_CLIPBOARD_HOLD_SECS", "0"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9/chat");
        assert_eq!(config.max_words, 10);
        assert!(!config.unescape_entities);
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.clipboard_hold_secs, 0);
        assert_eq!(config.env_overrides.len(), 5);
        assert!(config.env_overrides.contains(&"YOUCHAT_MAX_WORDS"));
    }

    #[test]
    fn test_bad_numeric_override_is_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|k| {
            (k == "YOUCHAT_MAX_WORDS").then(|| "lots".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let config = AppConfig {
            max_words: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = \"other\"\nunescape_entities = false\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.api_key, "other");
        assert!(!config.unescape_entities);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }
}
