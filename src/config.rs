//! Configuration for the content gateway.
//!
//! Configuration sources (highest priority first):
//! 1. Explicit overrides (CLI flags)
//! 2. Environment variables (NEWSROOM_BASE_URL, NEWSROOM_TIMEOUT_SECONDS)
//! 3. Project config file (.newsroom/config.yaml, searched upward from cwd)
//! 4. User config file (<config dir>/newsroom/config.yaml)
//! 5. Defaults
//!
//! The base URL has no default: a gateway always needs to be pointed at a
//! content repository explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::MAX_PER_PAGE;
use crate::domain::DEFAULT_AUTHOR;

pub const ENV_BASE_URL: &str = "NEWSROOM_BASE_URL";
pub const ENV_TIMEOUT: &str = "NEWSROOM_TIMEOUT_SECONDS";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryConfig {
    /// REST base, e.g. https://example.com/wp-json/wp/v2
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    pub excerpt_chars: Option<usize>,
    pub default_author: Option<String>,
    pub page_size: Option<usize>,
    pub digest_size: Option<usize>,
    pub recent_limit: Option<usize>,
}

/// Resolved gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Content repository REST base
    pub base_url: String,
    /// Records requested per listing call
    pub per_page: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Excerpt budget in graphemes
    pub excerpt_chars: usize,
    /// Author shown when a record has none
    pub default_author: String,
    /// Listing page size
    pub page_size: usize,
    /// Items in the latest-posts digest
    pub digest_size: usize,
    /// Items in the detail page's recent sidebar
    pub recent_limit: usize,
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}
fn default_timeout() -> u64 {
    10
}
fn default_excerpt_chars() -> usize {
    150
}
fn default_page_size() -> usize {
    9
} // 3x3 grid
fn default_digest_size() -> usize {
    3
}
fn default_recent_limit() -> usize {
    5
}

impl GatewayConfig {
    /// Config with defaults for everything except the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            per_page: default_per_page(),
            timeout_seconds: default_timeout(),
            excerpt_chars: default_excerpt_chars(),
            default_author: DEFAULT_AUTHOR.to_string(),
            page_size: default_page_size(),
            digest_size: default_digest_size(),
            recent_limit: default_recent_limit(),
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Overlay values from a config file
    fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(ref base_url) = file.repository.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(per_page) = file.repository.per_page {
            self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        }
        if let Some(timeout_seconds) = file.repository.timeout_seconds {
            self.timeout_seconds = timeout_seconds;
        }
        if let Some(excerpt_chars) = file.display.excerpt_chars {
            self.excerpt_chars = excerpt_chars;
        }
        if let Some(ref author) = file.display.default_author {
            self.default_author = author.clone();
        }
        if let Some(page_size) = file.display.page_size {
            self.page_size = page_size;
        }
        if let Some(digest_size) = file.display.digest_size {
            self.digest_size = digest_size;
        }
        if let Some(recent_limit) = file.display.recent_limit {
            self.recent_limit = recent_limit;
        }
    }

    /// Check that the base URL is an absolute http(s) URL and that the
    /// timeout and page size are usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!(
                "No content repository configured. \
                 Set {} or repository.base_url in .newsroom/config.yaml",
                ENV_BASE_URL
            );
        }

        let url = url::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Base URL must use http or https: {}", self.base_url);
        }

        if self.timeout_seconds == 0 {
            anyhow::bail!("repository.timeout_seconds must be at least 1");
        }
        if self.page_size == 0 {
            anyhow::bail!("display.page_size must be at least 1");
        }

        Ok(())
    }
}

/// Find config file by searching a directory and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".newsroom").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// User-level config file, if one exists
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("newsroom").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve configuration from a specific file plus environment
fn resolve(config_file: Option<&Path>, base_url_override: Option<&str>) -> Result<GatewayConfig> {
    let mut config = GatewayConfig::new(String::new());

    if let Some(path) = config_file {
        config.apply_file(&load_config_file(path)?);
    }

    if let Ok(env_url) = std::env::var(ENV_BASE_URL) {
        config.base_url = env_url;
    }
    if let Ok(env_timeout) = std::env::var(ENV_TIMEOUT) {
        config.timeout_seconds = env_timeout
            .parse()
            .with_context(|| format!("{} must be a number of seconds", ENV_TIMEOUT))?;
    }

    if let Some(base_url) = base_url_override {
        config.base_url = base_url.to_string();
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from all sources
pub fn load_config(base_url_override: Option<&str>) -> Result<GatewayConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = find_config_file(&cwd).or_else(user_config_file);
    resolve(config_file.as_deref(), base_url_override)
}
