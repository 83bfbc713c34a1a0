//! Error types for costboard-core
//!
//! Every error is terminal for the operation that produced it: callers report
//! the message and abort, there is no retry or partial-result path.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for costboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Invalid JSON: {message}")]
    JsonSyntax {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Document parsed as JSON but does not match the cost-center schema.
    /// `index` is the offending record's position where one exists.
    #[error("{}", format_validation(.index, .message))]
    Validation {
        index: Option<usize>,
        message: String,
    },

    // ===================
    // Network Errors
    // ===================
    #[error("Billing API error: {kind}")]
    Network { kind: NetworkErrorKind },

    // ===================
    // Config Errors
    // ===================
    #[error("Could not determine a config directory for credentials")]
    ConfigDir,
}

impl CoreError {
    /// Validation error with no record index (document-level failure)
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        CoreError::Validation {
            index: None,
            message: message.into(),
        }
    }

    /// Validation error pinned to a record index
    pub fn invalid_record(index: usize, message: impl Into<String>) -> Self {
        CoreError::Validation {
            index: Some(index),
            message: message.into(),
        }
    }

}

fn format_validation(index: &Option<usize>, message: &str) -> String {
    match index {
        Some(i) => format!("Invalid cost center at index {}: {}", i, message),
        None => format!("Invalid document: {}", message),
    }
}

/// Cause of a billing API failure, mapped from the HTTP response
///
/// The closed set the UI layer renders as human-readable messages; anything
/// that is not a recognized auth/lookup failure collapses to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// 401 - missing or rejected token
    Unauthenticated,
    /// 403 - token lacks access to the enterprise
    Forbidden,
    /// 404 - unknown enterprise or endpoint
    NotFound,
    /// Any other non-2xx status, or a transport failure (status unavailable)
    Failed(Option<u16>),
}

impl NetworkErrorKind {
    /// Map an HTTP status code to an error kind
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => NetworkErrorKind::Unauthenticated,
            403 => NetworkErrorKind::Forbidden,
            404 => NetworkErrorKind::NotFound,
            other => NetworkErrorKind::Failed(Some(other)),
        }
    }
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkErrorKind::Unauthenticated => {
                write!(f, "authentication failed (check your API token)")
            }
            NetworkErrorKind::Forbidden => {
                write!(f, "access forbidden (token lacks permission for this enterprise)")
            }
            NetworkErrorKind::NotFound => {
                write!(f, "enterprise or billing endpoint not found")
            }
            NetworkErrorKind::Failed(Some(status)) => {
                write!(f, "request failed with status {}", status)
            }
            NetworkErrorKind::Failed(None) => write!(f, "request failed"),
        }
    }
}
