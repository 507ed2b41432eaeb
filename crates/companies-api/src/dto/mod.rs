//! Request payloads and their validation

pub mod company;
pub mod validated;

pub use company::{CreateCompanyRequest, UpdateCompanyRequest};
pub use validated::ValidatedJson;
