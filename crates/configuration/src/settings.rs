use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub seed: SeedSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Contains parameters for the document store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// A sqlx SQLite URL, e.g. `sqlite://docboard.db` or `sqlite::memory:`.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    /// Insert the starter documents at startup when the store is empty.
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://docboard.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// Resolves the configured host and port into a bindable address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {e}")))
    }
}
