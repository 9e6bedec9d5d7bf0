use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, SeedSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `DOCBOARD__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "DOCBOARD";

/// Loads the application settings.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (if it
/// exists), then `DOCBOARD__*` environment variables. The merged result is
/// validated before it is returned.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let defaults = Settings::default();
    let builder = config::Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("database.url", defaults.database.url)?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("seed.enabled", defaults.seed.enabled)?
        .set_default("logging.level", defaults.logging.level)?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.database.url, "sqlite://docboard.db");
        assert!(settings.seed.enabled);
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[database]
url = "sqlite::memory:"

[seed]
enabled = false
"#
        )
        .unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.database.max_connections, 5);
        assert!(!settings.seed.enabled);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();

        let err = load_settings(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
