//! Event publisher trait (port)

use async_trait::async_trait;
use crate::error::PublishError;

/// Fire-and-forget delivery of pre-serialized messages.
///
/// Implementations may buffer and flush asynchronously; a successful return
/// only means the messages were accepted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, messages: Vec<Vec<u8>>) -> Result<(), PublishError>;

    /// Stops accepting messages and releases resources.
    async fn close(&self);
}
