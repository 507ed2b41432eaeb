//! # Companies Infrastructure
//! 
//! Database and messaging implementations (adapters).

pub mod database;
pub mod messaging;

pub use database::{create_pool, run_migrations, PgCompanyRepository};
pub use messaging::{AsyncProducer, MessageSink, ProducerConfig, RedisStreamSink, TracingSink};
