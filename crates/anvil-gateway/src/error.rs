//! # Gateway Error Types
//!
//! Error types for gateway calls.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gateway Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  NotFound               │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  RemoteRejected         │ │
//! │  │  ConfigLoad/    │  │  RequestFailed  │  │  DeserializationFailed  │ │
//! │  │  ConfigSave     │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried: a failed call surfaces to the operator, who
//! corrects input or connectivity and tries again.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error type covering configuration, transport and response
/// failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid gateway configuration.
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// Invalid gateway base URL.
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load gateway config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save gateway config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the gateway at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Connect or request timeout elapsed.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Request failed in transit for another reason.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The gateway has no record for the requested identifier.
    #[error("No {resource} found for '{id}'")]
    NotFound { resource: String, id: String },

    /// The gateway answered with a non-success status.
    #[error("Gateway rejected the request ({status}): {detail}")]
    RemoteRejected { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode gateway response: {0}")]
    DeserializationFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            GatewayError::DeserializationFailed(err.to_string())
        } else {
            GatewayError::RequestFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for GatewayError {
    fn from(err: toml::ser::Error) -> Self {
        GatewayError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::DeserializationFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl GatewayError {
    /// Returns true if the gateway had no record for the identifier.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidConfig(_)
                | GatewayError::InvalidUrl(_)
                | GatewayError::ConfigLoadFailed(_)
                | GatewayError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if the request never produced a usable response.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionFailed(_)
                | GatewayError::Timeout(_)
                | GatewayError::RequestFailed(_)
        )
    }

    /// HTTP status of a rejection, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorization() {
        assert!(GatewayError::NotFound {
            resource: "product".into(),
            id: "P-100".into()
        }
        .is_not_found());

        assert!(GatewayError::InvalidUrl("not a url".into()).is_config_error());
        assert!(GatewayError::Timeout("30s elapsed".into()).is_transport_error());
        assert!(!GatewayError::Timeout("30s elapsed".into()).is_config_error());
    }

    #[test]
    fn test_status_only_on_rejections() {
        let rejected = GatewayError::RemoteRejected {
            status: 422,
            detail: "bad payload".into(),
        };
        assert_eq!(rejected.status(), Some(422));
        assert_eq!(GatewayError::ConnectionFailed("refused".into()).status(), None);
    }

    #[test]
    fn test_not_found_display_names_resource() {
        let err = GatewayError::NotFound {
            resource: "bill".into(),
            id: "B-42".into(),
        };
        assert_eq!(err.to_string(), "No bill found for 'B-42'");
    }
}
