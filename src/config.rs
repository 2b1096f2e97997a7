//! Configuration support for cyberguard.
//!
//! Settings come from an optional `cyberguard.config.yml` file plus
//! environment variables; the environment wins when both are set. The
//! AI credential is resolved at startup - its absence does not block the
//! dashboard, but every analysis attempt will fail with a configuration
//! error.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "cyberguard.config.yml";

/// Where record listings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Builtin in-memory demo dataset; no auth required
    Builtin,
    /// Hosted Supabase project; requires URL, anon key and a session
    Supabase,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "builtin" => Ok(DataSource::Builtin),
            "supabase" => Ok(DataSource::Supabase),
            _ => Err(format!(
                "Invalid data source: {}. Please specify 'builtin' or 'supabase'",
                s
            )),
        }
    }
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub data_source: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub data_source: DataSource,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl AppConfig {
    /// Resolves the final configuration from a (possibly defaulted)
    /// config file and an environment lookup. Environment variables
    /// override file values.
    pub fn from_sources(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let data_source = match env("CYBERGUARD_DATA_SOURCE").or(file.data_source) {
            Some(raw) => DataSource::from_str(&raw).map_err(|message| {
                crate::shared::TriageError::Validation { message }
            })?,
            None => DataSource::Builtin,
        };

        let config = Self {
            gemini_api_key: env("GEMINI_API_KEY").or(file.gemini_api_key),
            gemini_model: env("GEMINI_MODEL").or(file.gemini_model),
            data_source,
            supabase_url: env("SUPABASE_URL").or(file.supabase_url),
            supabase_anon_key: env("SUPABASE_ANON_KEY").or(file.supabase_anon_key),
        };

        config.validate()?;
        Ok(config)
    }

    /// Resolves configuration from the process environment.
    pub fn resolve(file: ConfigFile) -> Result<Self> {
        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    fn validate(&self) -> Result<()> {
        if self.data_source == DataSource::Supabase
            && (self.supabase_url.is_none() || self.supabase_anon_key.is_none())
        {
            bail!(
                "Invalid configuration: data_source 'supabase' requires both \
                 supabase_url and supabase_anon_key.\n\n\
                 💡 Hint: Set SUPABASE_URL and SUPABASE_ANON_KEY, or add them to {}.",
                CONFIG_FILENAME
            );
        }
        Ok(())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
