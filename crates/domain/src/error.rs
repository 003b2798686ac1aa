//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AdminError`]
//! via `From`, so handlers only ever match on one enum.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Input rejected before touching any store.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The configuration or archive database failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A host-side effect (file write, command) failed.
    #[error("host system error")]
    Host(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons an input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("configuration key must not be empty")]
    EmptyKey,

    #[error("configuration key {0:?} contains invalid characters")]
    InvalidKey(String),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("unknown report kind {0:?}")]
    UnknownReportKind(String),

    #[error("{field} is required for a static network configuration")]
    MissingNetworkField { field: &'static str },

    #[error("{field} must be an IPv4 address")]
    InvalidNetworkField { field: &'static str },
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id:?} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
