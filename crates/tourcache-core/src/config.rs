//! Service configuration.
//!
//! Settings are read from `~/.config/tourcache/config.json` when present,
//! then overridden by environment variables (`SHEET_URL` and the
//! `TOURCACHE_*` family). Every field has a default except the sheet URL.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::parser::ParserOptions;

/// Application name used for the config directory path
const APP_NAME: &str = "tourcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_CACHE_EXPIRY_SECS: u64 = 5 * 60;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COUNTRY_PREFIX: &str = "20";

/// Anything shorter is treated as an error page rather than sheet data.
pub const DEFAULT_MIN_BODY_BYTES: usize = 50;

pub const DEFAULT_NAME_FIELD: &str = "Name";
pub const DEFAULT_PHONE_FIELD: &str = "Phone";
pub const DEFAULT_INQUIRY_MESSAGE: &str = "مرحباً! أريد الاستفسار عن جولة: {name}";
pub const DEFAULT_USER_AGENT: &str = "Alarab-Tours-Bot/1.0";

const ENV_SHEET_URL: &str = "SHEET_URL";
const ENV_CACHE_EXPIRY: &str = "TOURCACHE_CACHE_EXPIRY_SECS";
const ENV_FETCH_TIMEOUT: &str = "TOURCACHE_FETCH_TIMEOUT_SECS";
const ENV_COUNTRY_PREFIX: &str = "TOURCACHE_COUNTRY_PREFIX";
const ENV_MIN_BODY_BYTES: &str = "TOURCACHE_MIN_BODY_BYTES";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet_url: Option<String>,
    pub cache_expiry_secs: u64,
    pub fetch_timeout_secs: u64,
    pub country_prefix: String,
    pub min_body_bytes: usize,
    pub name_field: String,
    pub phone_field: String,
    /// Contact message template; `{name}` is replaced with the tour name.
    pub inquiry_message: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_url: None,
            cache_expiry_secs: DEFAULT_CACHE_EXPIRY_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            country_prefix: DEFAULT_COUNTRY_PREFIX.to_string(),
            min_body_bytes: DEFAULT_MIN_BODY_BYTES,
            name_field: DEFAULT_NAME_FIELD.to_string(),
            phone_field: DEFAULT_PHONE_FIELD.to_string(),
            inquiry_message: DEFAULT_INQUIRY_MESSAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn with_sheet_url(mut self, url: impl Into<String>) -> Self {
        self.sheet_url = Some(url.into());
        self
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SHEET_URL) {
            let url = url.trim();
            self.sheet_url = (!url.is_empty()).then(|| url.to_string());
        }
        if let Some(value) = lookup(ENV_CACHE_EXPIRY) {
            self.cache_expiry_secs = parse_var(ENV_CACHE_EXPIRY, &value)?;
        }
        if let Some(value) = lookup(ENV_FETCH_TIMEOUT) {
            self.fetch_timeout_secs = parse_var(ENV_FETCH_TIMEOUT, &value)?;
        }
        if let Some(value) = lookup(ENV_COUNTRY_PREFIX) {
            self.country_prefix = value.trim().to_string();
        }
        if let Some(value) = lookup(ENV_MIN_BODY_BYTES) {
            self.min_body_bytes = parse_var(ENV_MIN_BODY_BYTES, &value)?;
        }
        Ok(())
    }

    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.cache_expiry_secs)
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            name_field: self.name_field.clone(),
            phone_field: self.phone_field.clone(),
            country_prefix: self.country_prefix.clone(),
            inquiry_message: self.inquiry_message.clone(),
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.sheet_url.is_none());
        assert_eq!(config.cache_expiry(), Duration::from_secs(300));
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.country_prefix, "20");
        assert_eq!(config.min_body_bytes, 50);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("SHEET_URL", " https://example.com/sheet.csv "),
                ("TOURCACHE_CACHE_EXPIRY_SECS", "60"),
                ("TOURCACHE_COUNTRY_PREFIX", "971"),
            ]))
            .unwrap();

        assert_eq!(config.sheet_url.as_deref(), Some("https://example.com/sheet.csv"));
        assert_eq!(config.cache_expiry_secs, 60);
        assert_eq!(config.country_prefix, "971");
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_blank_sheet_url_is_unset() {
        let mut config = Config::default().with_sheet_url("https://example.com");
        config.apply_env(env(&[("SHEET_URL", "   ")])).unwrap();
        assert!(config.sheet_url.is_none());
    }

    #[test]
    fn test_invalid_number_is_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[("TOURCACHE_FETCH_TIMEOUT_SECS", "ten")]))
            .unwrap_err();
        assert!(err.to_string().contains("TOURCACHE_FETCH_TIMEOUT_SECS"));
    }

    #[test]
    fn test_partial_config_file() {
        let config: Config =
            serde_json::from_str(r#"{"sheet_url": "https://example.com/x.csv", "country_prefix": "966"}"#)
                .unwrap();
        assert_eq!(config.country_prefix, "966");
        assert_eq!(config.name_field, "Name");
        assert_eq!(config.cache_expiry_secs, 300);
    }
}
