//! Redis stream sink: every message becomes one `XADD` entry.

use async_trait::async_trait;
use deadpool_redis::{redis, Config, Pool, Runtime};
use tracing::debug;

use companies_core::error::PublishError;

use super::producer::MessageSink;

/// Field name of the message body inside a stream entry
pub const PAYLOAD_FIELD: &str = "payload";

pub struct RedisStreamSink {
    pool: Pool,
    stream: String,
}

impl RedisStreamSink {
    /// Builds the connection pool. Connections are opened lazily on first write.
    pub fn connect(url: &str, stream: impl Into<String>) -> Result<Self, PublishError> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        Ok(Self {
            pool,
            stream: stream.into(),
        })
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }
}

#[async_trait]
impl MessageSink for RedisStreamSink {
    async fn write_batch(&self, batch: &[Vec<u8>]) -> Result<(), PublishError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let mut pipe = redis::pipe();
        for message in batch {
            pipe.cmd("XADD")
                .arg(&self.stream)
                .arg("*")
                .arg(PAYLOAD_FIELD)
                .arg(message.as_slice())
                .ignore();
        }

        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        debug!(stream = %self.stream, count = batch.len(), "Batch written to stream");
        Ok(())
    }
}
