//! Messaging module (event publisher adapters)

pub mod producer;
pub mod redis_sink;
pub mod tracing_sink;

pub use producer::{AsyncProducer, MessageSink, ProducerConfig};
pub use redis_sink::RedisStreamSink;
pub use tracing_sink::TracingSink;
