//! Error type for Qubole API calls.

use thiserror::Error;

/// Errors surfaced by the platform client.
///
/// 404 is split out from the other HTTP failures because cluster deletion
/// treats a missing cluster as benign.
#[derive(Error, Debug)]
pub enum QdsError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("Qubole API returned HTTP {status}")]
    Api {
        status: u16,
        /// The platform's structured error payload, relayed verbatim
        payload: serde_json::Value,
    },

    #[error("network error talking to Qubole: {0}")]
    Network(#[from] reqwest::Error),
}

impl QdsError {
    /// The platform error payload, if this error carries one.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            QdsError::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QdsError::NotFound(_))
    }
}
