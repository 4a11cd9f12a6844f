//! Console configuration.
//!
//! Sources, highest priority first: CLI flags, `CARDHOLDER_*` environment
//! variables, the TOML file, built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cardholder_client::{ClientConfig, DEFAULT_API_URL};
use serde::Deserialize;
use thiserror::Error;

/// Config file looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "cardholder.toml";

/// Log file used unless configured otherwise
pub const DEFAULT_LOG_FILE: &str = "cardholder.log";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

const ENV_API_URL: &str = "CARDHOLDER_API_URL";
const ENV_LOG_LEVEL: &str = "CARDHOLDER_LOG_LEVEL";
const ENV_LOG_FILE: &str = "CARDHOLDER_LOG_FILE";
const ENV_REQUEST_TIMEOUT: &str = "CARDHOLDER_REQUEST_TIMEOUT_SECS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base address of the REST API
    pub api_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Where logs go; an empty path turns logging off
    pub log_file: Option<PathBuf>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: "info".to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            request_timeout_secs: 30,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `CARDHOLDER_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = lookup(ENV_API_URL) {
            self.api_url = api_url;
        }
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }
        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(log_file));
        }
        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = timeout.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_REQUEST_TIMEOUT,
                value: timeout.clone(),
            })?;
        }
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(api_url) = &cli.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            errors.push(format!(
                "Invalid api_url '{}'. Must start with http:// or https://",
                self.api_url
            ));
        }

        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Log destination, `None` when logging is disabled
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Settings for the data clients
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
    /// API base address override
    pub api_url: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
pub fn build_config(cli: &CliArgs) -> Result<ConsoleConfig, ConfigError> {
    let config = match &cli.config_file {
        Some(path) => ConsoleConfig::load(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                ConsoleConfig::load(default_path)?
            } else {
                ConsoleConfig::default()
            }
        }
    };

    let mut config = config.with_env_override()?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config_validates() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.log_path(), Some(Path::new("cardholder.log")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_log_file_disables_logging() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_file = \"\"").unwrap();
        let config = ConsoleConfig::load(file.path()).unwrap();
        assert_eq!(config.log_path(), None);

        let env = vars(&[("CARDHOLDER_LOG_FILE", "")]);
        let config = ConsoleConfig::default()
            .with_overrides_from(|k| env.get(k).cloned())
            .unwrap();
        assert_eq!(config.log_path(), None);
    }

    #[test]
    fn test_load_partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"https://cards.example.com/api\"").unwrap();
        writeln!(file, "log_file = \"/var/log/cardholder.log\"").unwrap();

        let config = ConsoleConfig::load(file.path()).unwrap();
        assert_eq!(config.api_url, "https://cards.example.com/api");
        assert_eq!(config.log_path(), Some(Path::new("/var/log/cardholder.log")));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = \"soon\"").unwrap();

        let err = ConsoleConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConsoleConfig::load(Path::new("/nonexistent/cardholder.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            ("CARDHOLDER_API_URL", "http://backend:9000/api"),
            ("CARDHOLDER_LOG_LEVEL", "debug"),
            ("CARDHOLDER_REQUEST_TIMEOUT_SECS", "5"),
        ]);
        let config = ConsoleConfig::default()
            .with_overrides_from(|k| env.get(k).cloned())
            .unwrap();

        assert_eq!(config.api_url, "http://backend:9000/api");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_env_timeout_must_be_a_number() {
        let env = vars(&[("CARDHOLDER_REQUEST_TIMEOUT_SECS", "later")]);
        let err = ConsoleConfig::default()
            .with_overrides_from(|k| env.get(k).cloned())
            .unwrap_err();
        assert!(err.to_string().contains("CARDHOLDER_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut config = ConsoleConfig::default();
        config.merge_with_cli(&CliArgs {
            config_file: None,
            api_url: Some("http://127.0.0.1:3000/api".to_string()),
            log_level: Some("warn".to_string()),
        });
        assert_eq!(config.api_url, "http://127.0.0.1:3000/api");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = ConsoleConfig {
            api_url: "localhost:8080".to_string(),
            log_level: "loud".to_string(),
            log_file: None,
            request_timeout_secs: 0,
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("api_url")));
                assert!(errors.iter().any(|e| e.contains("request_timeout_secs")));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_log_level_case_insensitive() {
        for level in ["trace", "DEBUG", "Info", "warn", "ERROR"] {
            let config = ConsoleConfig {
                log_level: level.to_string(),
                ..ConsoleConfig::default()
            };
            assert!(config.validate().is_ok(), "log level '{level}' should be valid");
        }
    }

    #[test]
    fn test_client_config() {
        let config = ConsoleConfig {
            request_timeout_secs: 7,
            ..ConsoleConfig::default()
        };
        let client = config.client_config();
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert_eq!(client.request_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_build_config_with_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://files.example.com/api\"").unwrap();

        let config = build_config(&CliArgs {
            config_file: Some(file.path().to_path_buf()),
            api_url: Some("http://cli.example.com/api".to_string()),
            log_level: None,
        })
        .unwrap();
        assert_eq!(config.api_url, "http://cli.example.com/api");
    }
}
