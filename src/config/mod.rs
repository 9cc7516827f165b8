//! Application configuration.
//!
//! Layered loading: built-in defaults, then an optional TOML file, then
//! `FILESCOUT__`-prefixed environment variables. Every field has a
//! default so a bare install runs without any config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::logging::LoggingConfig;

/// SQLite catalog settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("dev", "filescout", "filescout")
            .map(|dirs| dirs.data_local_dir().join("catalog.db"))
            .unwrap_or_else(|| PathBuf::from("filescout.db"));
        Self {
            path,
            max_connections: 8,
            busy_timeout_ms: 5_000,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub bind: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8650".to_string(),
        }
    }
}

/// External content-index settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FullTextSettings {
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FullTextSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Resolver tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Upper bound on candidates fetched from any retrieval path before
    /// in-process filtering and pagination.
    pub fetch_ceiling: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fetch_ceiling: 10_000,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub http: HttpSettings,
    pub full_text: FullTextSettings,
    pub search: SearchSettings,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, and the
    /// environment (`FILESCOUT__SECTION__KEY=value`).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder
            .add_source(config::Environment::with_prefix("FILESCOUT").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_stand_alone() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.http.bind, "127.0.0.1:8650");
        assert_eq!(cfg.search.fetch_ceiling, 10_000);
        assert!(!cfg.full_text.enabled);
        assert!(cfg.database.max_connections > 0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load(Some(Path::new("/nonexistent/filescout.toml"))).unwrap();
        assert_eq!(cfg.search.fetch_ceiling, AppConfig::default().search.fetch_ceiling);
    }
}
