//! Client settings
//!
//! Loaded from an optional TOML file, then overridden from the environment:
//!
//! | Variable                   | Field                  |
//! |----------------------------|------------------------|
//! | `FWH_BASE_URL`             | `base_url`             |
//! | `FWH_INITIAL_BACKOFF_SECS` | `initial_backoff_secs` |
//! | `FWH_REQUEST_TIMEOUT_SECS` | `request_timeout_secs` |

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Production gateway
pub const DEFAULT_BASE_URL: &str = "https://energy.franklinwh.com/";

/// First wait after the gateway asks to retry
pub const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 5;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("fwh-status/", env!("CARGO_PKG_VERSION"));

/// Settings of the HTTP client and the poll loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub base_url: String,
    pub initial_backoff_secs: u64,
    /// Per-request deadline; unset keeps the HTTP client's default
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            initial_backoff_secs: DEFAULT_INITIAL_BACKOFF_SECS,
            request_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientSettings {
    /// Load settings from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse TOML settings")
    }

    /// Load settings from an optional TOML file, then apply `FWH_*` overrides
    pub fn from_toml_with_env_overrides(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                info!("Loading client settings from {}", path.display());
                Self::from_toml_file(path)?
            }
            None => Self::default(),
        };

        settings.apply_overrides(|name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FWH_BASE_URL") {
            self.base_url = url;
        }

        if let Some(secs) = lookup("FWH_INITIAL_BACKOFF_SECS") {
            self.initial_backoff_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid FWH_INITIAL_BACKOFF_SECS: {}", secs))?;
        }

        if let Some(secs) = lookup("FWH_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = Some(
                secs.trim()
                    .parse()
                    .with_context(|| format!("Invalid FWH_REQUEST_TIMEOUT_SECS: {}", secs))?,
            );
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(anyhow!("Invalid base URL scheme: {}", url.scheme()));
        }

        if self.initial_backoff_secs == 0 {
            return Err(anyhow!("initial_backoff_secs must be positive"));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(anyhow!("request_timeout_secs must be positive when set"));
        }

        Ok(())
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_secs(self.initial_backoff_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
