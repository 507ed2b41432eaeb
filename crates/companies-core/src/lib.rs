//! # Companies Core
//! 
//! Domain entities, the company service, and the repository/publisher ports.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod messaging;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, PublishError};
