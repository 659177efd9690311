//! Logging configuration module
//!
//! Provides structured logging configuration with console and optional
//! rolling file output. In MCP mode console output goes to stderr, since
//! stdout is reserved for the protocol stream.

use std::io;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for log files; console-only when unset
    pub log_dir: Option<PathBuf>,
    /// Write console output to stderr instead of stdout
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            stderr: false,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: Option<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir,
            stderr: false,
        }
    }

    /// Route console output to stderr (MCP mode).
    pub fn to_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    /// Initialize logging based on configuration.
    ///
    /// Returns the file appender guard when file logging is enabled; the
    /// caller must keep it alive for the process lifetime or buffered log
    /// lines are lost.
    pub fn init(&self) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        // stdout for the HTTP server, stderr in MCP mode
        let console_layer: Box<dyn Layer<Registry> + Send + Sync> = if self.stderr {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stdout)
                .boxed()
        };

        let registry = tracing_subscriber::registry().with(console_layer);

        let guard = if let Some(ref dir) = self.log_dir {
            let file_appender = rolling::daily(dir, "ocsight.log");
            let (non_blocking, guard) = non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_writer(non_blocking);

            registry.with(file_layer).with(env_filter).init();
            Some(guard)
        } else {
            registry.with(env_filter).init();
            None
        };

        tracing::info!("Logging initialized - level: {}", self.level);
        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.log_dir.is_none());
        assert!(!config.stderr);
    }

    #[test]
    fn test_stderr_routing() {
        let config = LoggingConfig::new("debug", None).to_stderr();
        assert!(config.stderr);
        assert_eq!(config.level, "debug");
    }
}
