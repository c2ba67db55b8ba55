//! Configuration management for `wxquery`
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WxQueryError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "WXQUERY_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// National Weather Service API settings
    #[serde(default)]
    pub nws: NwsConfig,
    /// Nominatim geocoding settings
    #[serde(default)]
    pub nominatim: NominatimConfig,
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// NWS API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NwsConfig {
    /// Base URL for the NWS API
    #[serde(default = "default_nws_base_url")]
    pub base_url: String,
    /// User-Agent sent with every NWS request (NWS rejects anonymous clients)
    #[serde(default = "default_nws_user_agent")]
    pub user_agent: String,
}

/// Nominatim configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for Nominatim
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,
    /// Referer header identifying the application
    #[serde(default = "default_nominatim_referer")]
    pub referer: String,
    /// Pause after a forward geocoding request, in milliseconds
    #[serde(default = "default_nominatim_min_interval")]
    pub min_interval_ms: u64,
}

/// HTTP client configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_http_max_retries")]
    pub max_retries: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_nws_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_nws_user_agent() -> String {
    "(wxquery, wxquery@example.com)".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_nominatim_referer() -> String {
    "https://github.com/wxquery/wxquery".to_string()
}

fn default_nominatim_min_interval() -> u64 {
    1000
}

fn default_http_timeout() -> u32 {
    30
}

fn default_http_max_retries() -> u32 {
    2
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: default_nws_base_url(),
            user_agent: default_nws_user_agent(),
        }
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            referer: default_nominatim_referer(),
            min_interval_ms: default_nominatim_min_interval(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            max_retries: default_http_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(explicit)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(Self::get_config_path);

        if let Some(config_file) = config_file.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WXQUERY_HTTP__TIMEOUT_SECONDS=10 overrides http.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("WXQUERY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wxquery").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.nws.base_url.is_empty() {
            self.nws.base_url = default_nws_base_url();
        }
        if self.nws.user_agent.is_empty() {
            self.nws.user_agent = default_nws_user_agent();
        }
        if self.nominatim.base_url.is_empty() {
            self.nominatim.base_url = default_nominatim_base_url();
        }
        if self.nominatim.referer.is_empty() {
            self.nominatim.referer = default_nominatim_referer();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(WxQueryError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.max_retries > 10 {
            return Err(WxQueryError::config("HTTP max retries cannot exceed 10").into());
        }

        if self.nominatim.min_interval_ms > 10_000 {
            return Err(WxQueryError::config(
                "Nominatim request interval cannot exceed 10000 ms",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WxQueryError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WxQueryError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("NWS", &self.nws.base_url),
            ("Nominatim", &self.nominatim.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WxQueryError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.nws.base_url, "https://api.weather.gov");
        assert_eq!(config.nominatim.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.nominatim.min_interval_ms, 1000);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "chatty".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AppConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.nominatim.base_url = "ftp://nominatim.example".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Nominatim base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = AppConfig::default();
        config.nws.user_agent.clear();
        config.http.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.nws.user_agent, "(wxquery, wxquery@example.com)");
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[nws]\nbase_url = \"http://localhost:9000\"\n\n[http]\nmax_retries = 0"
        )
        .unwrap();

        let config = AppConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.nws.base_url, "http://localhost:9000");
        assert_eq!(config.http.max_retries, 0);
        assert_eq!(config.nominatim.min_interval_ms, 1000);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("wxquery"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
