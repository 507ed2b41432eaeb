//! Sink that only logs messages. Used when no broker is configured.

use async_trait::async_trait;
use tracing::info;

use companies_core::error::PublishError;

use super::producer::MessageSink;

#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl MessageSink for TracingSink {
    async fn write_batch(&self, batch: &[Vec<u8>]) -> Result<(), PublishError> {
        for message in batch {
            info!(message = %String::from_utf8_lossy(message), "Company event");
        }
        Ok(())
    }
}
