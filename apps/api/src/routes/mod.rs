pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::eligibility::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Eligibility API
        .route("/api/v1/cases/analyze", post(handlers::handle_analyze_case))
        .route(
            "/api/v1/schemes/discover",
            post(handlers::handle_discover_schemes),
        )
        // Reference lookups for the form layer
        .route("/api/v1/policies/regions", get(handlers::handle_list_regions))
        .route("/api/v1/policies/schemes", get(handlers::handle_list_schemes))
        .route(
            "/api/v1/policies/schemes/:name",
            get(handlers::handle_get_scheme),
        )
        .with_state(state)
}
