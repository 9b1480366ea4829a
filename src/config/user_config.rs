//! User-level configuration for netimpact
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/netimpact/config.toml (or an explicit `--config` path)
//!
//! CLI flags are applied on top by the command layer.

use crate::inventory::{AuthScheme, InventorySettings, DEFAULT_TIMEOUT_SECS};
use crate::scoring::ImpactWeights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_NETBOX_URL: &str = "http://localhost:8000";
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scoring: ImpactWeights,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct InventoryConfig {
    /// NetBox base URL (default: http://localhost:8000)
    pub url: Option<String>,

    /// NetBox API token
    pub token: Option<String>,

    /// Authorization scheme: "Token" (default) or "Bearer"
    pub auth_scheme: Option<String>,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (default: 0.0.0.0)
    pub bind: Option<String>,

    /// Listen port (default: 80)
    pub port: Option<u16>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. Config file (explicit path, else ~/.config/netimpact/config.toml)
    ///
    /// An explicit path must exist. A file that exists but does not parse is
    /// an error either way.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::load_file(path)?,
            None => match Self::user_config_path().filter(|p| p.exists()) {
                Some(path) => Self::load_file(&path)?,
                None => UserConfig::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a single TOML config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: UserConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded user config from {}", path.display());
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("netimpact").join("config.toml"))
    }

    /// Override fields from environment variables (NETBOX_URL, NETBOX_TOKEN,
    /// NETIMPACT_AUTH_SCHEME). `lookup` is injectable for tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("NETBOX_URL").filter(|v| !v.is_empty()) {
            self.inventory.url = Some(url);
        }
        if let Some(token) = lookup("NETBOX_TOKEN").filter(|v| !v.is_empty()) {
            self.inventory.token = Some(token);
        }
        if let Some(scheme) = lookup("NETIMPACT_AUTH_SCHEME").filter(|v| !v.is_empty()) {
            self.inventory.auth_scheme = Some(scheme);
        }
    }

    pub fn netbox_url(&self) -> &str {
        self.inventory.url.as_deref().unwrap_or(DEFAULT_NETBOX_URL)
    }

    pub fn has_token(&self) -> bool {
        self.inventory.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Token with all but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        let token = self.inventory.token.as_deref().filter(|t| !t.is_empty())?;
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 4 {
            return Some("*".repeat(chars.len()));
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        Some(format!("{}{}", "*".repeat(chars.len() - 4), tail))
    }

    pub fn auth_scheme(&self) -> Result<AuthScheme> {
        match self.inventory.auth_scheme.as_deref() {
            None => Ok(AuthScheme::default()),
            Some(s) => s.parse::<AuthScheme>().map_err(|e| anyhow::anyhow!(e)),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.inventory.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn bind(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    /// Validated scoring weights
    pub fn weights(&self) -> Result<ImpactWeights> {
        self.scoring
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid [scoring] config: {}", e))?;
        Ok(self.scoring)
    }

    /// Build connection settings for the inventory client.
    /// Fails when no token is configured.
    pub fn inventory_settings(&self) -> Result<InventorySettings> {
        let token = self
            .inventory
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No NetBox token configured. Pass --netbox-token, set NETBOX_TOKEN, \
                     or add `token` under [inventory] in the config file"
                )
            })?;

        if self.inventory.timeout_secs == Some(0) {
            anyhow::bail!("[inventory] timeout_secs must be at least 1");
        }

        Ok(InventorySettings {
            base_url: self.netbox_url().to_string(),
            token,
            auth_scheme: self.auth_scheme()?,
            timeout: self.timeout(),
        })
    }

    /// Create the config directory and an example config file
    pub fn init_user_config(path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::user_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# netimpact configuration

[inventory]
# NetBox base URL
# url = "http://localhost:8000"

# API token (or set NETBOX_TOKEN)
# token = "0123456789abcdef"

# "Token" (NetBox default) or "Bearer"
# auth_scheme = "Token"

# Per-request timeout in seconds
# timeout_secs = 10

[server]
# bind = "0.0.0.0"
# port = 80

[scoring]
# device_weight = 5.0
# circuit_weight = 3.0
# interface_weight = 1.0
# redundancy_discount = 0.8
"#;
            std::fs::write(&config_path, example)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }

        Ok(config_path)
    }
}
