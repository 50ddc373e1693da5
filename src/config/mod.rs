//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::CostParams;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Calendar source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Source type: "http" or "file"
    #[serde(default = "default_source")]
    pub source: String,

    /// Events endpoint for the http source
    pub url: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Events file for the file source
    pub file: Option<PathBuf>,

    /// Lookback window, e.g. "7d", "12h", "30m"
    #[serde(default = "default_window")]
    pub window: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_source() -> String {
    "file".to_string()
}

fn default_token_env() -> String {
    "CALENDAR_TOKEN".to_string()
}

fn default_window() -> String {
    "7d".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_results() -> u32 {
    100
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            url: None,
            token_env: default_token_env(),
            file: None,
            window: default_window(),
            timeout_seconds: default_timeout(),
            max_results: default_max_results(),
        }
    }
}

/// Slack posting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default)]
    pub enabled: bool,

    pub webhook_url: Option<String>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub cost: CostParams,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            cost: CostParams::default(),
            calendar: CalendarConfig::default(),
            slack: SlackConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::models::CostModel::from_params(&self.cost)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        match self.calendar.source.as_str() {
            "http" => {
                if self.calendar.url.is_none() {
                    return Err(ConfigError::ValidationError(
                        "calendar.url is required for the http source".to_string(),
                    ));
                }
            }
            "file" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown calendar source: {other}"
                )));
            }
        }

        if self.calendar.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Calendar timeout must be greater than 0".to_string(),
            ));
        }

        crate::parse_window(&self.calendar.window)
            .map_err(ConfigError::ValidationError)?;

        if self.slack.enabled && self.slack.webhook_url.is_none() {
            return Err(ConfigError::ValidationError(
                "slack.webhook_url is required when slack is enabled".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.calendar.source, "file");
        assert_eq!(config.calendar.window, "7d");
        assert_eq!(config.calendar.max_results, 100);
        assert_eq!(config.server.port, 8080);
        assert!(!config.slack.enabled);
    }

    #[test]
    fn test_default_cost_section() {
        let config = AppConfig::default();

        assert_eq!(config.cost.annual_salary, 75_000.0);
        assert_eq!(config.cost.team_size, 6);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_http_requires_url() {
        let mut config = AppConfig::default();
        config.calendar.source = "http".to_string();

        assert!(config.validate().is_err());

        config.calendar.url = Some("https://calendar.example.com/events".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_unknown_source() {
        let mut config = AppConfig::default();
        config.calendar.source = "carrier-pigeon".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_window() {
        let mut config = AppConfig::default();
        config.calendar.window = "fortnight".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_slack_needs_webhook() {
        let mut config = AppConfig::default();
        config.slack.enabled = true;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_cost() {
        let mut config = AppConfig::default();
        config.cost.team_size = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            data_dir = "/tmp/meetings"

            [cost]
            annual_salary = 120000.0
            team_size = 4

            [calendar]
            source = "http"
            url = "https://calendar.example.com/events"
            window = "14d"

            [slack]
            enabled = true
            webhook_url = "https://hooks.slack.com/services/T/B/X"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/meetings"));
        assert_eq!(config.cost.annual_salary, 120_000.0);
        assert_eq!(config.cost.team_size, 4);
        // Unset cost fields keep their defaults
        assert_eq!(config.cost.work_hours_per_year, 2_000.0);
        assert_eq!(config.calendar.window, "14d");
        assert!(config.slack.enabled);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.cost.annual_salary, parsed.cost.annual_salary);
    }
}
