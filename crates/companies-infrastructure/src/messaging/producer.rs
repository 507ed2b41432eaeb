//! Asynchronous batching producer
//!
//! `publish` only enqueues onto a bounded channel. A background task drains
//! the channel and hands batches to a [`MessageSink`] once `batch_size`
//! messages are buffered or `batch_timeout` has passed since the first
//! buffered message, whichever comes first. Delivery is at-most-once: a batch
//! the sink rejects is logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info};

use companies_core::error::PublishError;
use companies_core::messaging::EventPublisher;

/// Destination of flushed batches
#[async_trait]
pub trait MessageSink: Send + Sync + 'static {
    async fn write_batch(&self, batch: &[Vec<u8>]) -> Result<(), PublishError>;
}

#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub batch_size: usize,
    pub batch_timeout: Duration,
    pub queue_capacity: usize,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            batch_timeout: Duration::from_secs(10),
            queue_capacity: 1024,
        }
    }
}

pub struct AsyncProducer {
    tx: Mutex<Option<mpsc::Sender<Vec<u8>>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl AsyncProducer {
    /// Starts the flush worker. Must be called from within a tokio runtime.
    pub fn new(sink: Arc<dyn MessageSink>, config: ProducerConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let worker = tokio::spawn(run_worker(rx, sink, config));

        Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }
}

#[async_trait]
impl EventPublisher for AsyncProducer {
    async fn publish(&self, messages: Vec<Vec<u8>>) -> Result<(), PublishError> {
        if messages.is_empty() {
            return Ok(());
        }

        let tx = self.tx.lock().clone().ok_or(PublishError::Closed)?;
        for message in messages {
            tx.try_send(message).map_err(|e| match e {
                TrySendError::Full(_) => PublishError::QueueFull,
                TrySendError::Closed(_) => PublishError::Closed,
            })?;
        }

        Ok(())
    }

    async fn close(&self) {
        // Dropping the last sender lets the worker drain and exit.
        drop(self.tx.lock().take());

        let worker = self.worker.lock().take();
        if let Some(handle) = worker {
            if let Err(e) = handle.await {
                error!("Producer worker failed: {}", e);
            }
            info!("Producer closed");
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<Vec<u8>>,
    sink: Arc<dyn MessageSink>,
    config: ProducerConfig,
) {
    let batch_size = config.batch_size.max(1);
    let mut batch: Vec<Vec<u8>> = Vec::with_capacity(batch_size);
    let mut deadline: Option<Instant> = None;

    loop {
        let received = match deadline {
            None => rx.recv().await,
            Some(at) => match timeout_at(at, rx.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    flush(sink.as_ref(), &mut batch).await;
                    deadline = None;
                    continue;
                }
            },
        };

        let Some(message) = received else {
            break;
        };

        if batch.is_empty() {
            deadline = Some(Instant::now() + config.batch_timeout);
        }
        batch.push(message);

        if batch.len() >= batch_size {
            flush(sink.as_ref(), &mut batch).await;
            deadline = None;
        }
    }

    flush(sink.as_ref(), &mut batch).await;
    debug!("Producer worker stopped");
}

async fn flush(sink: &dyn MessageSink, batch: &mut Vec<Vec<u8>>) {
    if batch.is_empty() {
        return;
    }

    match sink.write_batch(batch).await {
        Ok(()) => debug!(count = batch.len(), "Batch flushed"),
        Err(e) => error!(error = %e, dropped = batch.len(), "Failed to write batch"),
    }
    batch.clear();
}
