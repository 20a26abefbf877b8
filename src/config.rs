//! Configuration module for the tattoo API.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::upload::UploadConfig;
use crate::{Result, TattooError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum size of a whole request body in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_size() -> usize {
    50 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            max_body_size: default_max_body_size(),
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
    "data/tattoo.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Image upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Directory accepted images are written to.
    #[serde(default = "default_destination_dir")]
    pub destination_dir: String,
    /// Accepted MIME types, in the order they are reported to clients.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Maximum size of a non-file form field in bytes.
    #[serde(default = "default_max_field_size")]
    pub max_field_size: usize,
    /// Name of the multipart field carrying the image.
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// Whether stored images are served under `/uploads`.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
}

fn default_destination_dir() -> String {
    "uploads".to_string()
}

fn default_allowed_mime_types() -> Vec<String> {
    vec!["image/jpeg".to_string(), "image/png".to_string()]
}

fn default_max_field_size() -> usize {
    10_000_000
}

fn default_field_name() -> String {
    "image".to_string()
}

fn default_serve_static() -> bool {
    true
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            destination_dir: default_destination_dir(),
            allowed_mime_types: default_allowed_mime_types(),
            max_field_size: default_max_field_size(),
            field_name: default_field_name(),
            serve_static: default_serve_static(),
        }
    }
}

impl UploadsConfig {
    /// Build the gate configuration from these settings.
    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig {
            allowed_mime_types: self.allowed_mime_types.clone(),
            max_field_size: self.max_field_size,
            destination_dir: PathBuf::from(&self.destination_dir),
            field_name: self.field_name.clone(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// JWT secret key used to verify bearer tokens.
    #[serde(default)]
    pub jwt_secret: String,
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
    "logs/tattoo-api.log".to_string()
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
    /// Upload configuration.
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TattooError::Io)?;
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
        toml::from_str(s).map_err(|e| TattooError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TATTOO_JWT_SECRET`: Override the JWT secret key
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("TATTOO_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the JWT secret is not set
    /// - no MIME type is allowed for uploads
    /// - the image field name is empty
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(TattooError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via TATTOO_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.uploads.allowed_mime_types.is_empty() {
            return Err(TattooError::Config(
                "uploads.allowed_mime_types must not be empty".to_string(),
            ));
        }
        if self.uploads.field_name.is_empty() {
            return Err(TattooError::Config(
                "uploads.field_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
