//! Configuration management for the ocsight API
//!
//! This module provides a centralized configuration system that loads settings from:
//! 1. Environment variables (highest priority)
//! 2. Configuration file (TOML format)
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct for ocsight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcsightConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Cluster credential configuration
    pub cluster: ClusterConfig,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Cluster credential configuration
///
/// Credentials themselves live outside this system (kubeconfig file or
/// in-cluster service account); this only selects which source to consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Explicit kubeconfig path; default chain is used when unset
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to select
    pub context: Option<String>,
    /// Use the in-cluster service account instead of a kubeconfig
    pub in_cluster: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for log files; console-only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl OcsightConfig {
    /// Load configuration from environment variables and optional config file
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(config_path) = Self::find_config_file() {
            match Self::load_from_file(&config_path) {
                Ok(file_config) => config = file_config,
                Err(e) => {
                    tracing::warn!("Ignoring config file {:?}: {}", config_path, e);
                }
            }
        }

        config.apply_env_overrides();
        config
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.clone(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            // Environment variable override
            std::env::var("OCSIGHT_CONFIG").ok().map(PathBuf::from),
            // Standard locations
            Some(PathBuf::from("/etc/ocsight/config.toml")),
            Some(PathBuf::from("./ocsight.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("OCSIGHT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("OCSIGHT_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(path) = std::env::var("OCSIGHT_KUBECONFIG") {
            self.cluster.kubeconfig = Some(PathBuf::from(path));
        }
        if let Ok(context) = std::env::var("OCSIGHT_CONTEXT") {
            self.cluster.context = Some(context);
        }
        if let Ok(in_cluster) = std::env::var("OCSIGHT_IN_CLUSTER") {
            self.cluster.in_cluster = in_cluster == "1" || in_cluster.eq_ignore_ascii_case("true");
        }
        if let Ok(level) = std::env::var("OCSIGHT_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.cluster.in_cluster && self.cluster.kubeconfig.is_some() {
            return Err(ConfigError::Validation(
                "cluster.in_cluster and cluster.kubeconfig are mutually exclusive".to_string(),
            ));
        }
        if self.cluster.context.is_some() && self.cluster.in_cluster {
            return Err(ConfigError::Validation(
                "cluster.context has no effect with cluster.in_cluster".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Failed to read configuration file
    FileRead(PathBuf, String),
    /// Failed to parse configuration
    Parse(String),
    /// Configuration validation failed
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, err) => {
                write!(f, "Failed to read config file {:?}: {}", path, err)
            }
            ConfigError::Parse(err) => write!(f, "Failed to parse config: {}", err),
            ConfigError::Validation(err) => write!(f, "Config validation failed: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}
