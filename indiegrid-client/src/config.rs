//! Backend endpoint configuration.
//!
//! The base URL and publishable API key resolve through a priority chain:
//! environment variables first, then `~/.config/indiegrid/config.toml`.
//! Provenance is tracked per field so `indiegrid config` can show where each
//! value came from.

use std::path::PathBuf;

use crate::error::ApiError;

pub const ENV_URL: &str = "INDIEGRID_URL";
pub const ENV_API_KEY: &str = "INDIEGRID_API_KEY";

/// Connection details for the hosted backend.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Publishable (anon) API key sent with every request.
    pub api_key: String,
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each backend field.
#[derive(Debug)]
pub struct BackendSources {
    pub base_url: ConfigSource,
    pub api_key: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    backend: Option<BackendSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct BackendSection {
    url: Option<String>,
    api_key: Option<String>,
}

/// Canonical path to the config file: `~/.config/indiegrid/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("indiegrid").join("config.toml")
}

/// Path to the cached session token: `~/.config/indiegrid/session.json`.
pub fn session_cache_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("indiegrid").join("session.json")
}

impl Backend {
    /// Resolve the backend config, failing when either field is missing.
    pub fn load() -> Result<(Self, BackendSources), ApiError> {
        Self::load_from(&config_path())
    }

    /// Resolution against an explicit file path (tests use a temp dir).
    pub fn load_from(path: &std::path::Path) -> Result<(Self, BackendSources), ApiError> {
        let file: ConfigFile = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|e| ApiError::config(format!("invalid config file: {e}")))?,
            Err(_) => ConfigFile::default(),
        };
        let section = file.backend.unwrap_or_default();

        let (base_url, url_source) = match std::env::var(ENV_URL) {
            Ok(v) if !v.is_empty() => (Some(v), ConfigSource::EnvVar(ENV_URL)),
            _ => match section.url {
                Some(v) if !v.is_empty() => (Some(v), ConfigSource::ConfigFile),
                _ => (None, ConfigSource::Missing),
            },
        };
        let (api_key, key_source) = match std::env::var(ENV_API_KEY) {
            Ok(v) if !v.is_empty() => (Some(v), ConfigSource::EnvVar(ENV_API_KEY)),
            _ => match section.api_key {
                Some(v) if !v.is_empty() => (Some(v), ConfigSource::ConfigFile),
                _ => (None, ConfigSource::Missing),
            },
        };

        let sources = BackendSources {
            base_url: url_source,
            api_key: key_source,
        };
        match (base_url, api_key) {
            (Some(url), Some(key)) => Ok((
                Self {
                    base_url: url.trim_end_matches('/').to_string(),
                    api_key: key,
                },
                sources,
            )),
            (None, _) => Err(ApiError::config(format!(
                "backend URL not configured (set ${ENV_URL} or run `indiegrid config set --url`)"
            ))),
            (_, None) => Err(ApiError::config(format!(
                "API key not configured (set ${ENV_API_KEY} or run `indiegrid config set --api-key`)"
            ))),
        }
    }

    /// Write (or update) the config file, preserving the other field.
    pub fn save(url: Option<&str>, api_key: Option<&str>) -> Result<PathBuf, ApiError> {
        let path = config_path();
        Self::save_to(&path, url, api_key)?;
        Ok(path)
    }

    pub fn save_to(
        path: &std::path::Path,
        url: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut file: ConfigFile = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => ConfigFile::default(),
        };
        let section = file.backend.get_or_insert_with(BackendSection::default);
        if let Some(u) = url {
            section.url = Some(u.trim_end_matches('/').to_string());
        }
        if let Some(k) = api_key {
            section.api_key = Some(k.to_string());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(&file)
            .map_err(|e| ApiError::config(format!("could not serialize config: {e}")))?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
