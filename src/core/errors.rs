// src/core/errors.rs

//! Defines the primary error type for the entire crate.

use thiserror::Error;

/// The main error enum, representing all possible failures inside the
/// command-execution core.
///
/// Every variant maps onto an HTTP-like numeric status via [`CommandError::status`]:
/// 4xx for caller errors (safe for the caller to fix and retry verbatim) and
/// 5xx for store/internal errors. The dispatcher is the sole place where an
/// error is turned into a wire [`Response`](crate::core::Response).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Missing {0}")]
    MissingAttribute(String),

    #[error("{0} is too long")]
    AttributeTooLarge(String),

    #[error("Unrecognized command '{0}'")]
    UnknownMethod(String),

    #[error("{0}")]
    StoreRead(String),

    #[error("{0}")]
    StoreWrite(String),

    #[error("Failed to retrieve inserted row id")]
    RowIdUnavailable,

    #[error("Method line '{method}' registered by both '{first}' and '{second}'")]
    MethodCollision {
        method: String,
        first: String,
        second: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    /// The HTTP-like status code carried to the wire by this error.
    pub fn status(&self) -> u16 {
        match self {
            CommandError::MissingAttribute(_) | CommandError::AttributeTooLarge(_) => 402,
            CommandError::UnknownMethod(_) => 430,
            CommandError::StoreRead(_)
            | CommandError::StoreWrite(_)
            | CommandError::RowIdUnavailable => 502,
            CommandError::MethodCollision { .. } | CommandError::Internal(_) => 500,
        }
    }

    /// Whether the failure is attributable to the caller's input (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }
}

// --- From trait implementations for easy error conversion ---

impl From<rusqlite::Error> for CommandError {
    fn from(e: rusqlite::Error) -> Self {
        CommandError::Internal(format!("SQLite error: {e}"))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Internal(format!("JSON serialization error: {e}"))
    }
}
