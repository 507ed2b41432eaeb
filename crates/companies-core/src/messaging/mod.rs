//! Messaging ports

pub mod publisher;

pub use publisher::EventPublisher;
