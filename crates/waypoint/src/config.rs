//! Configuration management for the Waypoint position server.
//!
//! This module handles loading, validation, and conversion of server
//! configuration from an optional TOML file and command-line arguments.
//! The configuration file is read-only: default operation touches no
//! files, and no file is ever created or written.

use game_server::ServerConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

/// Default listen port for serde deserialization
fn default_port() -> u16 {
    4000
}

/// Default log level for serde deserialization
fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration, optionally loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Server-specific configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// TCP port to listen on; the server binds all interfaces
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging system configuration.
///
/// Controls log output format and level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// The file must exist and parse; an explicitly requested config file
    /// that cannot be loaded is a fatal startup error for the caller.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    pub async fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Converts the application configuration to a game server
    /// configuration.
    ///
    /// The server binds all interfaces on the configured port, matching
    /// the original single-argument process interface.
    pub fn to_server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.server.port),
        }
    }

    /// Validates the configuration for consistency and correctness.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error string
    /// describing the issue.
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use tokio::fs;

    #[test]
    fn default_config_listens_on_4000() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn to_server_config_binds_all_interfaces() {
        let mut config = AppConfig::default();
        config.server.port = 4123;

        let server_config = config.to_server_config();
        assert_eq!(server_config.bind_address.port(), 4123);
        assert!(server_config.bind_address.ip().is_unspecified());
    }

    #[tokio::test]
    async fn load_from_existing_file() {
        let toml_content = r#"
[server]
port = 5000

[logging]
level = "debug"
json_format = true
"#;
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), toml_content).await.unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[tokio::test]
    async fn load_from_missing_file_is_an_error() {
        let result = AppConfig::load_from_file(Path::new("does_not_exist.toml")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_sections_fall_back_to_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[server]\nport = 6000\n")
            .await
            .unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn validation_rejects_unknown_log_levels() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid log level"));
    }

    #[test]
    fn validation_accepts_all_known_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let mut config = AppConfig::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "Level '{level}' should be valid");
        }
    }
}
