//! # configs
//!
//! Layered settings for Vidboard binaries.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults,
//! 2. `config/vidboard.{toml,yaml,json}` if present,
//! 3. `VIDBOARD__*` environment variables (`VIDBOARD__LOG__LEVEL=debug`).
//!
//! A `.env` file in the working directory is loaded into the environment
//! with [`EnvFile::load`] before the sources are read. Its outcome is kept so
//! the caller can log it once a subscriber is installed.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "config/vidboard";
const ENV_PREFIX: &str = "VIDBOARD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Outcome of loading `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(PathBuf),
    Absent,
    Unreadable(String),
}

impl EnvFile {
    pub fn load() -> Self {
        Self::from_outcome(dotenvy::dotenv())
    }

    fn from_outcome(outcome: dotenvy::Result<PathBuf>) -> Self {
        match outcome {
            Ok(path) => Self::Loaded(path),
            Err(err) if err.not_found() => Self::Absent,
            Err(err) => Self::Unreadable(err.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Self::Absent => {}
            Self::Unreadable(error) => tracing::warn!(%error, "ignoring unreadable .env"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LogSettings {
    /// Default `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Videos returned by a trending query without an explicit limit
    pub trending_limit: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeedSettings {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub log: LogSettings,
    pub catalog: CatalogSettings,
    pub seed: SeedSettings,
}

impl Settings {
    /// Reads the optional config file and the environment. Call
    /// [`EnvFile::load`] first for `.env` values to take part.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(Some(DEFAULT_CONFIG_FILE), true)
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_sources(None, false)
    }

    fn from_sources(file: Option<&str>, with_env: bool) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("log.level", "info")?
            .set_default("log.json", false)?
            .set_default("catalog.trending_limit", 10_i64)?
            .set_default("seed.enabled", true)?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }
        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log.level must not be empty".into()));
        }
        if self.catalog.trending_limit == 0 {
            return Err(ConfigError::Invalid(
                "catalog.trending_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.log.level, "info");
        assert!(!settings.log.json);
        assert_eq!(settings.catalog.trending_limit, 10);
        assert!(settings.seed.enabled);
    }

    #[test]
    fn zero_trending_limit_is_rejected() {
        let mut settings = Settings::defaults().unwrap();
        settings.catalog.trending_limit = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn blank_log_level_is_rejected() {
        let mut settings = Settings::defaults().unwrap();
        settings.log.level = " ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn env_file_outcome_is_kept_for_later_logging() {
        use std::io::{Error, ErrorKind};

        let missing = dotenvy::Error::Io(Error::new(ErrorKind::NotFound, "no .env"));
        assert_eq!(EnvFile::from_outcome(Err(missing)), EnvFile::Absent);

        let denied = dotenvy::Error::Io(Error::new(ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(EnvFile::from_outcome(Err(denied)), EnvFile::Unreadable(_)));

        let path = PathBuf::from("/srv/vidboard/.env");
        assert_eq!(EnvFile::from_outcome(Ok(path.clone())), EnvFile::Loaded(path));
    }
}
