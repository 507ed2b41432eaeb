//! # Companies Shared
//! 
//! Shared configuration, telemetry, constants and utilities for the companies service.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
