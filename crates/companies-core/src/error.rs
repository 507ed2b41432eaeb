//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Company not found")]
    CompanyNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Failures of the notification side-channel. Never surfaced to API callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Event serialization failed: {0}")]
    Serialization(String),

    #[error("Publish queue is full")]
    QueueFull,

    #[error("Publisher is closed")]
    Closed,

    #[error("Broker error: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        PublishError::Serialization(err.to_string())
    }
}
