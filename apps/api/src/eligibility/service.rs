//! Eligibility Request Orchestrator.
//!
//! Flow per submission: validate → filter context → build prompt + schema →
//! ONE reasoning call → validating decode → typed result.
//!
//! Analysis mode never propagates a reasoning failure: the fixed
//! `Needs Review` fallback is substituted and surfaced to the caller.
//! Discovery mode surfaces reasoning failures as errors with no payload.
//! The `ServiceUnavailable` / `MalformedResponse` distinction is preserved in
//! logs even though both recover identically.

use tracing::{info, warn};

use crate::eligibility::filter::{analysis_context, discovery_context, render_context};
use crate::eligibility::models::{
    AnalysisResult, CaseRequest, DiscoveryRequest, EligibilityStatus, EligibleScheme,
    PolicyReference,
};
use crate::eligibility::prompts;
use crate::eligibility::schema;
use crate::errors::{AppError, RequestError};
use crate::llm_client::ReasoningBackend;
use crate::policy::PolicyStore;

/// Upper bound on related-scheme suggestions surfaced per analysis.
const MAX_RELATED_SCHEMES: usize = 3;

const FALLBACK_REASON: &str =
    "System was unable to verify remote policy database. Please check connection.";
const FALLBACK_SUMMARY: &str = "Automatic analysis unavailable.";
const FALLBACK_REFERENCE_NAME: &str = "System Error";

/// Runs a single-scheme analysis. Local validation failures are the only
/// error path; every reasoning failure resolves to the fallback verdict.
pub async fn analyze_case(
    backend: &dyn ReasoningBackend,
    store: &PolicyStore,
    request: &CaseRequest,
) -> Result<AnalysisResult, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let context = analysis_context(store, &request.location, &request.scheme);
    info!(
        "Analysis context: {} of {} records for scheme '{}' in '{}'",
        context.len(),
        store.records().len(),
        request.scheme,
        request.location
    );

    let system = prompts::analysis_system_instruction(&request.location, &render_context(&context));
    let prompt = prompts::analysis_user_prompt(request);

    match run_analysis(backend, &prompt, &system).await {
        Ok(result) => Ok(result),
        Err(err) => {
            log_degraded("analysis", &err);
            Ok(analysis_fallback())
        }
    }
}

async fn run_analysis(
    backend: &dyn ReasoningBackend,
    prompt: &str,
    system: &str,
) -> Result<AnalysisResult, RequestError> {
    let text = backend
        .generate(prompt, system, schema::analysis_response_schema())
        .await?;
    decode_analysis(&text)
}

/// Runs a multi-scheme discovery search. Reasoning failures surface as
/// errors; there is no fallback payload in this mode.
pub async fn discover_schemes(
    backend: &dyn ReasoningBackend,
    store: &PolicyStore,
    request: &DiscoveryRequest,
) -> Result<Vec<EligibleScheme>, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let context = discovery_context(store, &request.location);
    info!(
        "Discovery context: {} of {} records for '{}'",
        context.len(),
        store.records().len(),
        request.location
    );

    let system = prompts::discovery_system_instruction(request, &render_context(&context));
    let prompt = prompts::discovery_user_prompt(request);

    let result = async {
        let text = backend
            .generate(&prompt, &system, schema::discovery_response_schema())
            .await?;
        decode_discovery(&text)
    }
    .await;

    match result {
        Ok(schemes) => {
            info!("Discovery found {} eligible schemes", schemes.len());
            Ok(schemes)
        }
        Err(err) => {
            log_degraded("discovery", &err);
            Err(AppError::Reasoning(err))
        }
    }
}

/// Validating decoder for analysis mode: every required field and enum value
/// is checked by the typed deserialization; anything off-shape is a
/// `MalformedResponse`, never a partially-typed result.
fn decode_analysis(text: &str) -> Result<AnalysisResult, RequestError> {
    let mut result: AnalysisResult = serde_json::from_str(text)
        .map_err(|e| RequestError::MalformedResponse(e.to_string()))?;
    result.related_schemes.truncate(MAX_RELATED_SCHEMES);
    Ok(result)
}

fn decode_discovery(text: &str) -> Result<Vec<EligibleScheme>, RequestError> {
    serde_json::from_str(text).map_err(|e| RequestError::MalformedResponse(e.to_string()))
}

fn log_degraded(mode: &str, err: &RequestError) {
    match err {
        RequestError::ServiceUnavailable(_) => {
            warn!("{mode} degraded: service unavailable: {err}")
        }
        RequestError::MalformedResponse(_) => {
            warn!("{mode} degraded: malformed response: {err}")
        }
    }
}

/// The fixed verdict substituted when the reasoning round trip fails in
/// analysis mode. Timestamped with the current instant.
pub fn analysis_fallback() -> AnalysisResult {
    AnalysisResult {
        status: EligibilityStatus::NeedsReview,
        reason: FALLBACK_REASON.to_string(),
        criteria_breakdown: vec![],
        summary: FALLBACK_SUMMARY.to_string(),
        policy_reference: PolicyReference {
            name: FALLBACK_REFERENCE_NAME.to_string(),
            section: "N/A".to_string(),
            date: chrono::Utc::now().to_rfc3339(),
        },
        related_schemes: vec![],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::eligibility::models::{ApplicationType, Category, MatchConfidence};
    use crate::llm_client::LlmError;

    /// Counting backend: returns a canned payload, or fails when none is set.
    struct MockBackend {
        calls: AtomicUsize,
        payload: Option<String>,
    }

    impl MockBackend {
        fn succeeding(payload: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                payload: Some(payload.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                payload: None,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReasoningBackend for MockBackend {
        async fn generate(
            &self,
            _user_prompt: &str,
            _system_instruction: &str,
            _response_schema: Value,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload.clone().ok_or(LlmError::EmptyContent)
        }
    }

    fn case(age: u32, income: f64, location: &str) -> CaseRequest {
        CaseRequest {
            scheme: "Pradhan Mantri Awas Yojana (Urban)".to_string(),
            age,
            income,
            category: Category::General,
            location: location.to_string(),
            application_type: ApplicationType::New,
            question: None,
            officer_name: None,
            department: None,
        }
    }

    fn profile(location: &str) -> DiscoveryRequest {
        DiscoveryRequest {
            name: "Ramesh Kumar".to_string(),
            age: 45,
            income: 150_000.0,
            location: location.to_string(),
            category: Category::General,
            department: None,
        }
    }

    const VALID_ANALYSIS_JSON: &str = r#"{
        "status": "Eligible",
        "reason": "Income within EWS slab.",
        "criteriaBreakdown": [
            {"name": "Income Limit", "met": true, "explanation": "₹2.5L within ₹3L EWS cap"}
        ],
        "summary": "Applicant qualifies under EWS.",
        "policyReference": {"name": "PMAY-U Guidelines", "section": "2.1", "date": "2021"},
        "relatedSchemes": []
    }"#;

    #[tokio::test]
    async fn test_analysis_success_decodes_result() {
        let backend = MockBackend::succeeding(VALID_ANALYSIS_JSON);
        let store = PolicyStore::load().unwrap();

        let result = analyze_case(&backend, &store, &case(45, 250_000.0, "Delhi"))
            .await
            .unwrap();

        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert_eq!(result.criteria_breakdown.len(), 1);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analysis_remote_failure_yields_exact_fallback() {
        let backend = MockBackend::failing();
        let store = PolicyStore::load().unwrap();

        let result = analyze_case(&backend, &store, &case(45, 250_000.0, "Delhi"))
            .await
            .expect("remote failure must not surface as an error in analysis mode");

        assert_eq!(result.status, EligibilityStatus::NeedsReview);
        assert!(result.criteria_breakdown.is_empty());
        assert_eq!(result.summary, "Automatic analysis unavailable.");
        assert_eq!(result.policy_reference.name, "System Error");
        assert_eq!(result.policy_reference.section, "N/A");
        assert!(result.related_schemes.is_empty());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analysis_malformed_response_yields_fallback() {
        let backend = MockBackend::succeeding("this is not json");
        let store = PolicyStore::load().unwrap();

        let result = analyze_case(&backend, &store, &case(45, 250_000.0, "Delhi"))
            .await
            .unwrap();

        assert_eq!(result.status, EligibilityStatus::NeedsReview);
        assert_eq!(result.policy_reference.name, "System Error");
    }

    #[tokio::test]
    async fn test_analysis_validation_failure_issues_no_remote_call() {
        let backend = MockBackend::succeeding(VALID_ANALYSIS_JSON);
        let store = PolicyStore::load().unwrap();

        let err = analyze_case(&backend, &store, &case(0, 250_000.0, ""))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_related_schemes_clamped_to_three() {
        let related: Vec<String> = (0..5)
            .map(|i| {
                format!(
                    r#"{{"name": "Scheme {i}", "eligibilityProbability": "High", "reason": "r"}}"#
                )
            })
            .collect();
        let payload = format!(
            r#"{{
                "status": "Eligible",
                "reason": "ok",
                "criteriaBreakdown": [],
                "summary": "ok",
                "policyReference": {{"name": "X", "section": "1", "date": "2023"}},
                "relatedSchemes": [{}]
            }}"#,
            related.join(",")
        );
        let backend = MockBackend::succeeding(&payload);
        let store = PolicyStore::load().unwrap();

        let result = analyze_case(&backend, &store, &case(45, 250_000.0, "Delhi"))
            .await
            .unwrap();
        assert_eq!(result.related_schemes.len(), 3);
    }

    #[tokio::test]
    async fn test_discovery_success_decodes_matches() {
        let payload = r#"[
            {
                "name": "MGNREGA (Job Card)",
                "category": "Rural Employment",
                "matchReason": "Adult member of rural household",
                "confidence": "High",
                "benefits": "100 days of guaranteed employment"
            },
            {
                "name": "Atal Pension Yojana",
                "category": "Social Security",
                "matchReason": "Within 18-40 age band",
                "confidence": "Medium",
                "benefits": "Guaranteed monthly pension"
            }
        ]"#;
        let backend = MockBackend::succeeding(payload);
        let store = PolicyStore::load().unwrap();

        let schemes = discover_schemes(&backend, &store, &profile("Madhya Pradesh"))
            .await
            .unwrap();

        assert_eq!(schemes.len(), 2);
        assert_eq!(schemes[0].confidence, MatchConfidence::High);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_discovery_empty_array_is_valid() {
        let backend = MockBackend::succeeding("[]");
        let store = PolicyStore::load().unwrap();

        let schemes = discover_schemes(&backend, &store, &profile("Goa"))
            .await
            .unwrap();
        assert!(schemes.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_remote_failure_surfaces_error() {
        let backend = MockBackend::failing();
        let store = PolicyStore::load().unwrap();

        let err = discover_schemes(&backend, &store, &profile("Odisha"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Reasoning(RequestError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_discovery_malformed_response_kind_preserved() {
        let backend = MockBackend::succeeding("{\"oops\": true}");
        let store = PolicyStore::load().unwrap();

        let err = discover_schemes(&backend, &store, &profile("Odisha"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Reasoning(RequestError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_discovery_validation_failure_issues_no_remote_call() {
        let backend = MockBackend::succeeding("[]");
        let store = PolicyStore::load().unwrap();

        let mut req = profile("Odisha");
        req.income = -5.0;
        let err = discover_schemes(&backend, &store, &req).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_fallback_shape_is_fixed() {
        let fb = analysis_fallback();
        assert_eq!(fb.status, EligibilityStatus::NeedsReview);
        assert_eq!(
            fb.reason,
            "System was unable to verify remote policy database. Please check connection."
        );
        assert!(fb.criteria_breakdown.is_empty());
        assert_eq!(fb.summary, "Automatic analysis unavailable.");
        assert_eq!(fb.policy_reference.name, "System Error");
        // RFC 3339 timestamp, parseable back.
        assert!(chrono::DateTime::parse_from_rfc3339(&fb.policy_reference.date).is_ok());
    }
}
