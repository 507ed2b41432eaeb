// ============================================================================
// Companies API - Bearer Token Middleware
// File: crates/companies-api/src/middleware/auth.rs
// ============================================================================

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use companies_shared::utils::mask_email;

use crate::error::{ApiError, MISSING_TOKEN_MESSAGE};
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Rejects the request with 401 unless it carries a valid bearer token.
/// On success the token's [`Claims`](companies_security::Claims) are
/// stored in the request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let token = header.strip_prefix(BEARER_PREFIX).unwrap_or(header);

    if token.is_empty() {
        return Err(ApiError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()));
    }

    let claims = state
        .tokens
        .validate(token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    debug!(email = %mask_email(&claims.subject.email), "Request authenticated");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
