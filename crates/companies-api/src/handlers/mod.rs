//! HTTP handlers

pub mod company;
pub mod health;
