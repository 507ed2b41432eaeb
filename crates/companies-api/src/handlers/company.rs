// ============================================================================
// Companies API - Company Handlers
// File: crates/companies-api/src/handlers/company.rs
// ============================================================================
//! Company HTTP handlers (create, update, delete, get)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use companies_core::Company;
use companies_shared::utils::normalize_uuid;

use crate::dto::{CreateCompanyRequest, UpdateCompanyRequest, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type Empty = (StatusCode, Json<ApiResponse<()>>);

fn path_id(raw: &str) -> Result<String, ApiError> {
    normalize_uuid(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Create handler - POST /api/v1/secured/companies
pub async fn create_company(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCompanyRequest>,
) -> Result<Empty, ApiError> {
    debug!("Server.create_company");

    let company = payload
        .into_domain()
        .ok_or_else(|| ApiError::BadRequest("missing required field".to_string()))?;
    state.companies.create_company(company).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::empty())))
}

/// Update handler - PATCH /api/v1/secured/companies/{uuid}
pub async fn update_company(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCompanyRequest>,
) -> Result<Empty, ApiError> {
    let id = path_id(&raw_id)?;
    debug!(uuid = %id, "Server.update_company");

    state.companies.update_company(payload.into_patch(id)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty())))
}

/// Delete handler - DELETE /api/v1/secured/companies/{uuid}
pub async fn delete_company(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Empty, ApiError> {
    let id = path_id(&raw_id)?;
    debug!(uuid = %id, "Server.delete_company");

    state.companies.delete_company(&id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty())))
}

/// Get handler - GET /api/v1/companies/{uuid}
pub async fn get_company(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let id = path_id(&raw_id)?;
    debug!(uuid = %id, "Server.get_company");

    let company = state
        .companies
        .get_company(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Company not found".to_string()))?;

    Ok(Json(ApiResponse::success(company)))
}
