use std::sync::Arc;

use companies_core::services::CompanyUseCases;
use companies_security::TokenAuthority;

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyUseCases>,
    pub tokens: Arc<TokenAuthority>,
}

impl AppState {
    pub fn new(companies: Arc<dyn CompanyUseCases>, tokens: Arc<TokenAuthority>) -> Self {
        Self { companies, tokens }
    }
}
