//! Error taxonomy shared by the crate.

use thiserror::Error;

/// Errors raised by tour operations and their collaborators.
#[derive(Debug, Error)]
pub enum TourError {
    /// Malformed or unresolvable construction input: empty name, missing
    /// owner capability, unresolvable definition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Navigation attempted in a non-mutable status or on a tour without steps.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A collaborator was configured with an unusable value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record the operation depends on does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An event notifier rejected a notification.
    #[error("Notification failed: {0}")]
    Notification(String),
}

/// Result alias used by the crate's APIs.
pub type Result<T> = std::result::Result<T, TourError>;
