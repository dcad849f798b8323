//! Runtime configuration, resolved once at startup.
//!
//! Files live in the platform data directory (for example
//! `~/.local/share/saldofixo` on Linux). The only external settings are the
//! advisory credential and, optionally, which model and endpoint to use.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DB_FILE: &str = "saldofixo.db";
const LOG_FILE: &str = "saldofixo.log";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];
const MODEL_VAR: &str = "SALDOFIXO_MODEL";
const ENDPOINT_VAR: &str = "SALDOFIXO_ENDPOINT";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    data_dir: PathBuf,
    pub(crate) advisor: AdvisorConfig,
}

#[derive(Debug, Clone)]
pub(crate) struct AdvisorConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
    pub(crate) endpoint: String,
}

impl Config {
    /// Resolve the data directory (creating it if needed) and read the
    /// advisor settings from the environment.
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "saldofixo", "SaldoFixo")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::with_data_dir(proj_dirs.data_dir(), |name| std::env::var(name).ok())
    }

    pub(crate) fn with_data_dir(
        data_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            advisor: AdvisorConfig::from_env(env),
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

impl AdvisorConfig {
    fn from_env(env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: API_KEY_VARS.iter().find_map(|name| non_empty(*name)),
            model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: non_empty(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(dir.path(), env_from(&[])).unwrap();
        assert!(config.advisor.api_key.is_none());
        assert_eq!(config.advisor.model, DEFAULT_MODEL);
        assert_eq!(config.advisor.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.db_path(), dir.path().join("saldofixo.db"));
        assert_eq!(config.log_path(), dir.path().join("saldofixo.log"));
    }

    #[test]
    fn test_gemini_key_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_from(&[("GEMINI_API_KEY", "g-key"), ("API_KEY", "plain")]);
        let config = Config::with_data_dir(dir.path(), env).unwrap();
        assert_eq!(config.advisor.api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn test_falls_back_to_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_from(&[("GEMINI_API_KEY", "  "), ("API_KEY", "plain")]);
        let config = Config::with_data_dir(dir.path(), env).unwrap();
        assert_eq!(config.advisor.api_key.as_deref(), Some("plain"));
    }

    #[test]
    fn test_model_and_endpoint_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_from(&[
            ("SALDOFIXO_MODEL", "gemini-pro"),
            ("SALDOFIXO_ENDPOINT", "http://localhost:9999/v1"),
        ]);
        let config = Config::with_data_dir(dir.path(), env).unwrap();
        assert_eq!(config.advisor.model, "gemini-pro");
        assert_eq!(config.advisor.endpoint, "http://localhost:9999/v1");
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        Config::with_data_dir(&nested, env_from(&[])).unwrap();
        assert!(nested.is_dir());
    }
}
