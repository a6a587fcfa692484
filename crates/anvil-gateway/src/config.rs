//! # Gateway Configuration
//!
//! Connectivity settings for the gateway client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ANVIL_GATEWAY_URL=http://10.0.0.5:8080                             │
//! │     ANVIL_CONNECT_TIMEOUT_SECS=5                                       │
//! │     ANVIL_REQUEST_TIMEOUT_SECS=60                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/anvil-pos/gateway.toml (Linux)                           │
//! │     ~/Library/Application Support/com.anvil.pos/gateway.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, connect 10s, request 30s                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gateway.toml
//! base_url = "http://localhost:8080"
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GatewayError, GatewayResult};

// =============================================================================
// Gateway Configuration
// =============================================================================

/// Gateway connectivity configuration.
///
/// Timeouts are applied once, at client construction. A request either
/// completes, errors, or hits these bounds; there is no retry layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// TCP connect timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (gateway.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> GatewayResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading gateway config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Gateway config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load gateway config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> GatewayResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| GatewayError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GatewayError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| GatewayError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Gateway config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GatewayResult<()> {
        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GatewayError::InvalidUrl(format!(
                "Gateway URL must be http or https, got: {}",
                self.base_url
            )));
        }

        if self.connect_timeout_secs == 0 {
            return Err(GatewayError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(GatewayError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ANVIL_GATEWAY_URL") {
            debug!(url = %url, "Overriding gateway URL from environment");
            self.base_url = url;
        }

        if let Ok(secs) = std::env::var("ANVIL_CONNECT_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                self.connect_timeout_secs = parsed;
            }
        }

        if let Ok(secs) = std::env::var("ANVIL_REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                self.request_timeout_secs = parsed;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "anvil", "pos")
            .map(|dirs| dirs.config_dir().join("gateway.toml"))
    }
}
