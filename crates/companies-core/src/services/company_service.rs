// ============================================================================
// Companies Core - Company Service
// File: crates/companies-core/src/services/company_service.rs
// ============================================================================
//! Company use cases: persistence first, then a best-effort change event

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Company, CompanyPatch, Event, EventKind};
use crate::error::{DomainError, PublishError};
use crate::messaging::EventPublisher;
use crate::repositories::CompanyRepository;

/// Company operations as seen by the transport layer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyUseCases: Send + Sync {
    async fn create_company(&self, company: Company) -> Result<(), DomainError>;
    async fn update_company(&self, patch: CompanyPatch) -> Result<(), DomainError>;
    async fn delete_company(&self, id: &str) -> Result<(), DomainError>;
    async fn get_company(&self, id: &str) -> Result<Option<Company>, DomainError>;
}

/// Company service
///
/// Storage errors are returned unchanged. Publishing happens only after the
/// write succeeded and its failure is logged, never returned.
pub struct CompanyService<R: CompanyRepository, P: EventPublisher> {
    repo: Arc<R>,
    publisher: Arc<P>,
}

impl<R: CompanyRepository, P: EventPublisher> CompanyService<R, P> {
    pub fn new(repo: Arc<R>, publisher: Arc<P>) -> Self {
        Self { repo, publisher }
    }

    async fn publish(&self, event: &Event) -> Result<(), PublishError> {
        let message = event.to_bytes()?;
        let text = String::from_utf8_lossy(&message).into_owned();

        self.publisher.publish(vec![message]).await?;
        debug!(message = %text, "Event published");

        Ok(())
    }

    async fn notify<T: Serialize + ?Sized + Sync>(&self, kind: EventKind, payload: &T) {
        let result = match Event::new(kind, payload) {
            Ok(event) => self.publish(&event).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            warn!(error = %e, kind = %kind, "Failed to publish message");
        }
    }
}

#[async_trait]
impl<R: CompanyRepository, P: EventPublisher> CompanyUseCases for CompanyService<R, P> {
    async fn create_company(&self, company: Company) -> Result<(), DomainError> {
        debug!(id = %company.id, "CompanyService.create_company");

        self.repo.create_company(&company).await?;
        self.notify(EventKind::CompanyCreated, &company).await;

        Ok(())
    }

    async fn update_company(&self, patch: CompanyPatch) -> Result<(), DomainError> {
        debug!(id = %patch.id, "CompanyService.update_company");

        let affected = self.repo.update_company(&patch).await?;
        if affected == 0 {
            return Err(DomainError::CompanyNotFound);
        }
        self.notify(EventKind::CompanyUpdated, &patch).await;

        Ok(())
    }

    async fn delete_company(&self, id: &str) -> Result<(), DomainError> {
        debug!(id = %id, "CompanyService.delete_company");

        let affected = self.repo.delete_company(id).await?;
        if affected == 0 {
            return Err(DomainError::CompanyNotFound);
        }
        self.notify(EventKind::CompanyDeleted, id).await;

        Ok(())
    }

    async fn get_company(&self, id: &str) -> Result<Option<Company>, DomainError> {
        debug!(id = %id, "CompanyService.get_company");
        self.repo.get_company(id).await
    }
}
