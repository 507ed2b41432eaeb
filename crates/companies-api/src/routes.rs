use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{company, health};
use crate::middleware::require_bearer;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    // Mutations require a bearer token
    let secured = Router::new()
        .route("/companies", post(company::create_company))
        .route(
            "/companies/{uuid}",
            patch(company::update_company).delete(company::delete_company),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let api_v1 = Router::new()
        .route("/companies/{uuid}", get(company::get_company))
        .nest("/secured", secured);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
