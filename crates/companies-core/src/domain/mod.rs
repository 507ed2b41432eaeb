//! # Companies Core - Domain Module
//! 
//! Domain entities for the companies service.

pub mod company;
pub mod event;
pub mod patch;

pub use company::{Company, CompanyPatch, CompanyType};
pub use event::{Event, EventKind};
pub use patch::{build_update, CompanyUpdate};
