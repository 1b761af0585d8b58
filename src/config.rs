use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{CONTACT_PAGE_SIZE, SEARCH_DEBOUNCE_MS, SEARCH_RESULT_LIMIT};

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "PASTLEAD_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Remote collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries for idempotent reads (mutations are never retried)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_limit: default_search_limit(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl ListingConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where exported ignore lists are written (default: current directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    /// Resolve the export directory, expanding a leading `~`
    pub fn resolve_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => expand_home(dir),
            None => PathBuf::from("."),
        }
    }
}

pub(crate) fn expand_home(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_page_size() -> usize {
    CONTACT_PAGE_SIZE
}

fn default_search_limit() -> usize {
    SEARCH_RESULT_LIMIT
}

fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pastlead");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    /// `PASTLEAD_API_URL` takes precedence over the file.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            config.api.base_url = url.trim().to_string();
        }

        config.normalize();
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Clamp values that would break pagination or URL building
    fn normalize(&mut self) {
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self.listing.page_size = self.listing.page_size.max(1);
        self.listing.search_limit = self.listing.search_limit.max(1);
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [api]
            base_url = "http://triage.local:9000/"
            timeout_secs = 10
            max_retries = 0

            [listing]
            page_size = 25
            search_limit = 40
            search_debounce_ms = 300

            [ui]
            keybinding_mode = "arrows"

            [export]
            directory = "/tmp/exports"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.api.base_url, "http://triage.local:9000");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.api.max_retries, 0);
        assert_eq!(config.listing.page_size, 25);
        assert_eq!(config.listing.search_limit, 40);
        assert_eq!(config.listing.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Arrows);
        assert_eq!(
            config.export.resolve_directory(),
            PathBuf::from("/tmp/exports")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.listing.page_size, 50);
        assert_eq!(config.listing.search_limit, 20);
        assert_eq!(config.listing.search_debounce_ms, 500);
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Vim);
        assert_eq!(config.export.resolve_directory(), PathBuf::from("."));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let config = Config::parse("[listing]\npage_size = 0").unwrap();
        assert_eq!(config.listing.page_size, 1);
    }
}
