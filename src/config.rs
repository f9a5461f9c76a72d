//! Extension configuration loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid TOML for [`BetaConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Site-level configuration for the beta features extension.
#[derive(Debug, Clone, Deserialize)]
pub struct BetaConfig {
    /// Seconds a cached per-feature user count stays valid (default: 1800).
    #[serde(default = "default_count_cache_ttl")]
    pub count_cache_ttl: u64,

    /// When set, only the listed feature keys are offered; everything else
    /// a provider declares is skipped as if its dependency gate failed.
    #[serde(default)]
    pub allow_list: Option<Vec<String>>,

    /// Navigation entry the beta link is spliced in after (default:
    /// "preferences").
    #[serde(default = "default_nav_anchor")]
    pub nav_anchor: String,

    /// Whether the first-visit popup asset bundle may load at all
    /// (default: true). Individual users opt out via the popup-dismiss
    /// preference.
    #[serde(default = "default_popup_enabled")]
    pub popup_enabled: bool,
}

impl BetaConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: BetaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for BetaConfig {
    fn default() -> Self {
        Self {
            count_cache_ttl: default_count_cache_ttl(),
            allow_list: None,
            nav_anchor: default_nav_anchor(),
            popup_enabled: default_popup_enabled(),
        }
    }
}

// 30 minutes
fn default_count_cache_ttl() -> u64 {
    1800
}

fn default_nav_anchor() -> String {
    "preferences".to_string()
}

fn default_popup_enabled() -> bool {
    true
}
