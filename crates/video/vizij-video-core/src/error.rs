//! Error types for the playback controller

use serde::{Deserialize, Serialize};

/// Why a `play()` request did not start playback.
///
/// Play failures never escape the controller: it reverts its optimistic state
/// and logs. The variants exist so hosts and logs can tell policy blocks apart
/// from broken sources.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayError {
    /// Blocked by the host's autoplay / user-gesture policy
    #[error("playback not allowed by host policy")]
    NotAllowed,

    /// Source cannot be decoded or loaded
    #[error("media source not supported")]
    NotSupported,

    /// Interrupted by a pause or a new load before it resolved
    #[error("play request aborted")]
    Aborted,

    #[error("play failed: {reason}")]
    Other { reason: String },
}

impl PlayError {
    /// Classify a DOMException-style error name (`NotAllowedError`, ...).
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "NotSupportedError" => Self::NotSupported,
            "AbortError" => Self::Aborted,
            _ => Self::Other {
                reason: if message.is_empty() {
                    name.to_string()
                } else {
                    format!("{name}: {message}")
                },
            },
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotAllowed => "policy",
            Self::NotSupported => "source",
            Self::Aborted => "interrupted",
            Self::Other { .. } => "generic",
        }
    }

    /// Whether a later user-initiated play may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotAllowed | Self::Aborted)
    }
}

/// Invalid construction-time configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config error: src must not be empty")]
    MissingSource,

    #[error("config error: initial volume {volume} is outside [0, 1]")]
    InvalidVolume { volume: f64 },

    #[error("config error: {reason}")]
    Parse { reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
