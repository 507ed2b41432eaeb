//! Company repository trait (port)

use async_trait::async_trait;
use crate::domain::{Company, CompanyPatch};
use crate::error::DomainError;

/// Durable storage of companies.
///
/// Mutations report the number of affected rows; the service derives
/// "not found" from a zero count. A missing company on read is `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create_company(&self, company: &Company) -> Result<(), DomainError>;
    async fn update_company(&self, patch: &CompanyPatch) -> Result<u64, DomainError>;
    async fn delete_company(&self, id: &str) -> Result<u64, DomainError>;
    async fn get_company(&self, id: &str) -> Result<Option<Company>, DomainError>;
}
