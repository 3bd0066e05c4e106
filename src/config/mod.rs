//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (e.g., "127.0.0.1")
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page size defaults for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Page size used when the client sends none
    pub default_page_size: usize,

    /// Larger requested sizes are reduced to this
    pub max_page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 20,
        }
    }
}

/// HTTP caching headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachingConfig {
    /// `max-age` of the `Cache-Control` header on employee routes
    pub employees_max_age_secs: u64,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            employees_max_age_secs: 120,
        }
    }
}

/// Complete configuration of the API server
///
/// Every section is optional in YAML and falls back to its defaults.
///
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 8080
/// paging:
///   default_page_size: 10
///   max_page_size: 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub paging: PagingConfig,
    pub caching: CachingConfig,
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        Self::parse(&content, Some(path.display().to_string()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<String>) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
                file,
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paging.max_page_size == 0 {
            return Err(invalid(
                "paging.max_page_size",
                self.paging.max_page_size,
                "must be at least 1",
            ));
        }
        if self.paging.default_page_size == 0 {
            return Err(invalid(
                "paging.default_page_size",
                self.paging.default_page_size,
                "must be at least 1",
            ));
        }
        if self.paging.default_page_size > self.paging.max_page_size {
            return Err(invalid(
                "paging.default_page_size",
                self.paging.default_page_size,
                "must not exceed paging.max_page_size",
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(invalid("server.host", &self.server.host, "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
