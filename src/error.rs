//! Error Handling
//!
//! Unified error types for the notifier.
//! Uses thiserror for ergonomic error definitions.
//!
//! Only configuration-time problems are represented here: an unresolvable
//! status keyword, an empty target list, or a broken run context all abort
//! before any network call. Per-target delivery failures are deliberately
//! not part of this taxonomy — they are recorded in `DeliveryResult` and
//! never propagate, so the notifier cannot fail the pipeline it reports on.

use thiserror::Error;

/// Notifier-wide error type
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Status keyword is not one of the recognized values
    #[error("invalid status value: {0}")]
    InvalidStatus(String),

    /// The webhook target list resolved to empty
    #[error("no webhook target configured")]
    NoTargets,

    /// Run context is missing or malformed
    #[error("incomplete run context: {0}")]
    Context(String),

    /// File I/O errors (event payload file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for notifier errors
pub type NotifyResult<T> = Result<T, NotifyError>;

impl NotifyError {
    /// Create a run-context error
    pub fn context(msg: impl Into<String>) -> Self {
        Self::Context(msg.into())
    }
}
