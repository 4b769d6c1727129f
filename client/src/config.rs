//! Configuration for the `rawhttp` client.
//!
//! Supports both command-line arguments and a TOML configuration file.
//! CLI arguments take precedence over config file values.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rawhttp_core::{ExchangeOptions, ValidatorConfig};
use serde::Deserialize;

/// Command-line arguments for the client
#[derive(Parser, Debug)]
#[command(name = "rawhttp")]
#[command(version = "0.1.0")]
#[command(about = "Sends one GET / over a raw TCP socket and prints the reply", long_about = None)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Deadline for reading the whole response, in milliseconds
    #[arg(short = 't', long)]
    pub read_timeout_ms: Option<u64>,

    /// Timeout for establishing the connection, in milliseconds
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// Host used when stdin does not contain `<host> <port>`
    #[arg(long)]
    pub default_host: Option<String>,

    /// Port used when stdin does not contain `<host> <port>`
    #[arg(long)]
    pub default_port: Option<String>,

    /// Regular expression a port must match
    #[arg(long)]
    pub port_pattern: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Exchange-related configuration
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    pub connect_timeout_ms: Option<u64>,
    #[serde(default = "default_host")]
    pub default_host: String,
    #[serde(default = "default_port")]
    pub default_port: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
            connect_timeout_ms: None,
            default_host: default_host(),
            default_port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_read_timeout_ms() -> u64 {
    5_000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub read_timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub default_host: String,
    pub default_port: String,
    pub validator: ValidatorConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::merge(CliArgs::parse_from(["rawhttp"]), TomlConfig::default())
    }
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(cli: CliArgs) -> Result<Self, ConfigError> {
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };
        Ok(Self::merge(cli, toml_config))
    }

    /// CLI arguments take precedence over TOML values.
    fn merge(cli: CliArgs, toml_config: TomlConfig) -> Self {
        let mut validator = toml_config.validator;
        if let Some(pattern) = cli.port_pattern {
            validator.port_pattern = pattern;
        }

        Config {
            read_timeout: Duration::from_millis(
                cli.read_timeout_ms
                    .unwrap_or(toml_config.client.read_timeout_ms),
            ),
            connect_timeout: cli
                .connect_timeout_ms
                .or(toml_config.client.connect_timeout_ms)
                .map(Duration::from_millis),
            default_host: cli
                .default_host
                .unwrap_or(toml_config.client.default_host),
            default_port: cli
                .default_port
                .unwrap_or(toml_config.client.default_port),
            validator,
            log_level: cli.log_level.unwrap_or(toml_config.logging.level),
        }
    }

    pub fn exchange_options(&self) -> ExchangeOptions {
        ExchangeOptions {
            read_timeout: self.read_timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    TomlParse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::TomlParse(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.default_host, "127.0.0.1");
        assert_eq!(config.default_port, "8080");
        assert_eq!(config.validator, ValidatorConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [client]
            read_timeout_ms = 1500
            connect_timeout_ms = 250
            default_host = "www.google.com"
            default_port = "80"

            [validator]
            port_pattern = "^[0-9]+$"

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.client.read_timeout_ms, 1500);
        assert_eq!(config.client.connect_timeout_ms, Some(250));
        assert_eq!(config.client.default_host, "www.google.com");
        assert_eq!(config.client.default_port, "80");
        assert_eq!(config.validator.port_pattern, "^[0-9]+$");
        assert_eq!(
            config.validator.hostname_pattern,
            ValidatorConfig::default().hostname_pattern
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_overrides_toml() {
        let cli = CliArgs::parse_from([
            "rawhttp",
            "--read-timeout-ms",
            "100",
            "--default-port",
            "9090",
            "--port-pattern",
            "^9090$",
            "--log-level",
            "warn",
        ]);
        let toml_config: TomlConfig = toml::from_str(
            r#"
            [client]
            read_timeout_ms = 1500
            default_port = "80"
            connect_timeout_ms = 250

            [logging]
            level = "debug"
        "#,
        )
        .unwrap();

        let config = Config::merge(cli, toml_config);
        assert_eq!(config.read_timeout, Duration::from_millis(100));
        assert_eq!(config.connect_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.default_port, "9090");
        assert_eq!(config.validator.port_pattern, "^9090$");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_explicit_default_log_level_overrides_toml() {
        let cli = CliArgs::parse_from(["rawhttp", "--log-level", "info"]);
        let toml_config: TomlConfig = toml::from_str(
            r#"
            [logging]
            level = "debug"
        "#,
        )
        .unwrap();

        let config = Config::merge(cli, toml_config);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_toml_log_level_used_without_flag() {
        let cli = CliArgs::parse_from(["rawhttp"]);
        let toml_config: TomlConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(Config::merge(cli, toml_config).log_level, "debug");
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs::parse_from(["rawhttp", "--config", "/nonexistent/rawhttp.toml"]);
        let err = Config::from_args(cli).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(..)));
    }
}
