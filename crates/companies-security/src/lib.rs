//! # Companies Security
//! 
//! Bearer token issuance and validation.

pub mod jwt;

pub use jwt::{Claims, Subject, TokenAuthority, TokenError};
