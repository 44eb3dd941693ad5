//! Configuration module for itemshelf.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, ShelfError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/items.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded files.
    #[serde(default = "default_uploads_path")]
    pub uploads_path: String,
    /// URL prefix under which uploaded files are served as static content.
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_uploads_path() -> String {
    "uploads".to_string()
}

fn default_public_path() -> String {
    "/media".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_path: default_uploads_path(),
            public_path: default_public_path(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// CORS allowed origins (empty allows any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in megabytes (0 = unlimited).
    #[serde(default)]
    pub max_upload_size_mb: u64,
}

impl WebConfig {
    /// Request body limit in bytes, or `None` when unlimited.
    ///
    /// A limit too large for this platform saturates at `usize::MAX`;
    /// `Config::validate` rejects it before the server starts.
    pub fn body_limit_bytes(&self) -> Option<usize> {
        if self.max_upload_size_mb == 0 {
            return None;
        }
        Some(Self::checked_limit_bytes(self.max_upload_size_mb).unwrap_or(usize::MAX))
    }

    fn checked_limit_bytes(mb: u64) -> Option<usize> {
        usize::try_from(mb).ok()?.checked_mul(1024 * 1024)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/itemshelf.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ShelfError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ShelfError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ITEMSHELF_PORT`: listening port
    /// - `ITEMSHELF_DATABASE`: SQLite database path
    /// - `ITEMSHELF_UPLOADS`: blob storage directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("ITEMSHELF_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                // Logging is not initialised yet
                Err(_) => eprintln!("Ignoring invalid ITEMSHELF_PORT value: {port}"),
            }
        }
        if let Ok(path) = std::env::var("ITEMSHELF_DATABASE") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(path) = std::env::var("ITEMSHELF_UPLOADS") {
            if !path.is_empty() {
                self.storage.uploads_path = path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the uploads path is empty
    /// - the public path does not start with `/`
    /// - the upload size limit does not fit in memory addresses
    pub fn validate(&self) -> Result<()> {
        if self.storage.uploads_path.trim().is_empty() {
            return Err(ShelfError::Config("storage.uploads_path is empty".to_string()));
        }
        if !self.storage.public_path.starts_with('/') || self.storage.public_path == "/" {
            return Err(ShelfError::Config(format!(
                "storage.public_path must be a non-root path starting with '/': {}",
                self.storage.public_path
            )));
        }
        if self.web.max_upload_size_mb != 0
            && WebConfig::checked_limit_bytes(self.web.max_upload_size_mb).is_none()
        {
            return Err(ShelfError::Config(format!(
                "web.max_upload_size_mb is too large: {}",
                self.web.max_upload_size_mb
            )));
        }
        Ok(())
    }
}
