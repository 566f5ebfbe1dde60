//! Error types for the guard

use thiserror::Error;

/// Result type alias for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

/// Fault raised by a logging sink while recording an entry.
///
/// Screening treats these as best-effort: a fault is reported to the
/// operator and suppressed, never surfaced to the request.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The backend refused or dropped the entry
    #[error("sink backend fault: {0}")]
    Backend(String),

    /// Underlying I/O failure
    #[error("sink io fault: {0}")]
    Io(#[from] std::io::Error),
}
