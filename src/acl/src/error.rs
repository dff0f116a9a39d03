//! Error types for the access control engine

use std::time::Duration;
use thiserror::Error;

/// Access control errors
///
/// A denied request is never an error: it is `Ok(Decision::Denied)`.
/// Everything here means an assessor or the configuration misbehaved.
#[derive(Debug, Error)]
pub enum AclError {
    /// A role assessor failed while populating context or checking a role
    #[error("Role assessor '{role}' failed: {message}")]
    Assessor { role: String, message: String },

    /// Population or evaluation exceeded its configured time limit
    #[error("{phase} timed out after {limit:?}")]
    Timeout { phase: &'static str, limit: Duration },

    /// Invalid configuration document
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AclError {
    /// Build an assessor failure for `role`
    pub fn assessor(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assessor {
            role: role.into(),
            message: message.into(),
        }
    }
}

/// Result type for access control operations
pub type Result<T> = std::result::Result<T, AclError>;
