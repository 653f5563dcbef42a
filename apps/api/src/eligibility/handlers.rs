//! Axum route handlers for the eligibility API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::eligibility::models::{AnalysisResult, CaseRequest, DiscoveryRequest, EligibleScheme};
use crate::eligibility::service::{analyze_case, discover_schemes};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCaseResponse {
    /// Generated per submission for log correlation; nothing is persisted.
    pub case_id: Uuid,
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct DiscoverSchemesResponse {
    pub count: usize,
    pub schemes: Vec<EligibleScheme>,
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemeListResponse {
    pub schemes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemeDetailResponse {
    pub name: String,
    pub region: String,
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cases/analyze
///
/// Single-scheme eligibility verdict. A reasoning failure still returns 200
/// with the `Needs Review` fallback verdict, so the caller always gets a
/// result it can render.
pub async fn handle_analyze_case(
    State(state): State<AppState>,
    Json(request): Json<CaseRequest>,
) -> Result<Json<AnalyzeCaseResponse>, AppError> {
    let case_id = Uuid::new_v4();
    info!(
        "Case {case_id}: analyzing '{}' for {}-year-old in '{}'",
        request.scheme, request.age, request.location
    );

    let result = analyze_case(state.reasoning.as_ref(), &state.store, &request).await?;

    Ok(Json(AnalyzeCaseResponse { case_id, result }))
}

/// POST /api/v1/schemes/discover
///
/// Reverse search: every scheme the applicant appears eligible for.
/// Reasoning failures surface as a 502 error response.
pub async fn handle_discover_schemes(
    State(state): State<AppState>,
    Json(request): Json<DiscoveryRequest>,
) -> Result<Json<DiscoverSchemesResponse>, AppError> {
    let schemes = discover_schemes(state.reasoning.as_ref(), &state.store, &request).await?;

    Ok(Json(DiscoverSchemesResponse {
        count: schemes.len(),
        schemes,
    }))
}

/// GET /api/v1/policies/regions
///
/// Selectable states/UTs for the location field.
pub async fn handle_list_regions(State(state): State<AppState>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: state.store.states().to_vec(),
    })
}

/// GET /api/v1/policies/schemes
///
/// Selectable scheme names, sorted alphabetically.
pub async fn handle_list_schemes(State(state): State<AppState>) -> Json<SchemeListResponse> {
    Json(SchemeListResponse {
        schemes: state.store.scheme_names().to_vec(),
    })
}

/// GET /api/v1/policies/schemes/:name
///
/// Description card for a selected scheme. Rules text is never exposed here,
/// it only travels inside prompts.
pub async fn handle_get_scheme(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SchemeDetailResponse>, AppError> {
    let record = state
        .store
        .find(&name)
        .ok_or_else(|| AppError::NotFound(format!("Scheme '{name}' not found")))?;

    Ok(Json(SchemeDetailResponse {
        name: record.name.clone(),
        region: record.region.clone(),
        description: record.description.clone(),
    }))
}
