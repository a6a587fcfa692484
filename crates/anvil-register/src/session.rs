//! # Session Context
//!
//! The identifiers scoping every gateway call: which enterprise, which
//! store, which counter, and the auth token from login. Populated once by
//! the onboarding flow and persisted to `session.toml` under the platform
//! config directory, so a restarted terminal resumes where it left off.
//!
//! ## Session File Format
//! ```toml
//! # session.toml
//! enterprise_id = "E-7"
//! enterprise_name = "AnvilMart"
//! store_id = "S-1"
//! counter_id = "C-1"
//! token = "..."
//! ```
//!
//! A missing file or missing identifier surfaces as
//! [`WorkflowError::MissingContext`]; the billing workflow refuses to
//! start without a complete context.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{WorkflowError, WorkflowResult};

// =============================================================================
// Counter Scope
// =============================================================================

/// The identifier triple attached to scoped gateway calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterScope {
    pub enterprise_id: String,
    pub store_id: String,
    pub counter_id: String,
}

// =============================================================================
// Session Context
// =============================================================================

/// Everything a billing session needs to talk to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub enterprise_id: String,

    #[serde(default)]
    pub enterprise_name: String,

    pub store_id: String,

    pub counter_id: String,

    /// Auth token from the last login. Never logged.
    #[serde(default)]
    pub token: Option<String>,
}

impl SessionContext {
    pub fn new(
        enterprise_id: impl Into<String>,
        store_id: impl Into<String>,
        counter_id: impl Into<String>,
    ) -> Self {
        Self {
            enterprise_id: enterprise_id.into(),
            enterprise_name: String::new(),
            store_id: store_id.into(),
            counter_id: counter_id.into(),
            token: None,
        }
    }

    /// Loads the session from file.
    ///
    /// A missing file means nobody has logged in on this machine yet,
    /// which is a [`WorkflowError::MissingContext`], not an I/O error.
    pub fn load(session_path: Option<PathBuf>) -> WorkflowResult<Self> {
        let path = session_path
            .or_else(Self::default_session_path)
            .ok_or_else(|| WorkflowError::SessionLoadFailed("No session path available".into()))?;

        if !path.exists() {
            debug!(?path, "No session file");
            return Err(WorkflowError::MissingContext {
                field: "session file".to_string(),
            });
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| WorkflowError::SessionLoadFailed(e.to_string()))?;
        let context: SessionContext = toml::from_str(&contents)?;
        context.validate()?;

        debug!(enterprise_id = %context.enterprise_id, store_id = %context.store_id, "Session loaded");
        Ok(context)
    }

    /// Saves the session to file.
    pub fn save(&self, session_path: Option<PathBuf>) -> WorkflowResult<()> {
        let path = session_path
            .or_else(Self::default_session_path)
            .ok_or_else(|| WorkflowError::SessionSaveFailed("No session path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WorkflowError::SessionSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| WorkflowError::SessionSaveFailed(e.to_string()))?;

        info!(?path, "Session saved");
        Ok(())
    }

    /// Checks every identifier the workflow depends on is present.
    pub fn validate(&self) -> WorkflowResult<()> {
        if self.enterprise_id.trim().is_empty() {
            return Err(WorkflowError::MissingContext {
                field: "enterprise id".to_string(),
            });
        }
        if self.store_id.trim().is_empty() {
            return Err(WorkflowError::MissingContext {
                field: "store id".to_string(),
            });
        }
        if self.counter_id.trim().is_empty() {
            return Err(WorkflowError::MissingContext {
                field: "counter id".to_string(),
            });
        }
        Ok(())
    }

    /// The scope triple for gateway calls.
    pub fn scope(&self) -> CounterScope {
        CounterScope {
            enterprise_id: self.enterprise_id.clone(),
            store_id: self.store_id.clone(),
            counter_id: self.counter_id.clone(),
        }
    }

    fn default_session_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "anvil", "pos")
            .map(|dirs| dirs.config_dir().join("session.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
