//! Request and result types for both eligibility modes.
//!
//! Wire names are camelCase and match the response schema declarations in
//! `schema.rs` exactly — the reasoning service is instructed to conform its
//! output to these field names and enum values.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

/// Social category of the applicant. Fixed set — mirrors the form dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    General,
    OBC,
    SC,
    ST,
    EWS,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::General => "General",
            Category::OBC => "OBC",
            Category::SC => "SC",
            Category::ST => "ST",
            Category::EWS => "EWS",
        };
        f.write_str(label)
    }
}

/// Application type — descriptive metadata only, no effect on filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationType {
    #[default]
    New,
    Renewal,
    Appeal,
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApplicationType::New => "New",
            ApplicationType::Renewal => "Renewal",
            ApplicationType::Appeal => "Appeal",
        };
        f.write_str(label)
    }
}

/// Analysis-mode submission: a selected scheme plus applicant attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRequest {
    pub scheme: String,
    pub age: u32,
    pub income: f64,
    pub category: Category,
    pub location: String,
    #[serde(default)]
    pub application_type: ApplicationType,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub officer_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl CaseRequest {
    /// Pre-flight validation. A violation here blocks submission before any
    /// remote call is attempted.
    pub fn validate(&self) -> Result<(), String> {
        validate_common(self.age, self.income, &self.location)?;
        if self.scheme.trim().is_empty() {
            return Err("scheme must not be empty".to_string());
        }
        Ok(())
    }
}

/// Discovery-mode submission: an applicant profile only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRequest {
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub location: String,
    pub category: Category,
    #[serde(default)]
    pub department: Option<String>,
}

impl DiscoveryRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_common(self.age, self.income, &self.location)
    }
}

fn validate_common(age: u32, income: f64, location: &str) -> Result<(), String> {
    if age == 0 {
        return Err("age must be a positive integer".to_string());
    }
    if !income.is_finite() || income < 0.0 {
        return Err("income must be a non-negative amount".to_string());
    }
    if location.trim().is_empty() {
        return Err("location is required".to_string());
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Result side (analysis mode)
// ────────────────────────────────────────────────────────────────────────────

/// Verdict for a single-scheme analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityStatus {
    Eligible,
    #[serde(rename = "Not Eligible")]
    NotEligible,
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

/// One named criterion (e.g. "Income Limit") with its individual verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaCheck {
    pub name: String,
    pub met: bool,
    pub explanation: String,
}

/// Citation for the scheme the verdict is grounded on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyReference {
    pub name: String,
    pub section: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchProbability {
    High,
    Medium,
    Low,
}

/// Another scheme from the filtered context the applicant likely qualifies
/// for. At most three are surfaced per analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedScheme {
    pub name: String,
    pub eligibility_probability: MatchProbability,
    pub reason: String,
}

/// Full analysis-mode result as returned by the reasoning service (or the
/// local fallback). Transient — never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub status: EligibilityStatus,
    pub reason: String,
    pub criteria_breakdown: Vec<CriteriaCheck>,
    pub summary: String,
    pub policy_reference: PolicyReference,
    #[serde(default)]
    pub related_schemes: Vec<RelatedScheme>,
}

// ────────────────────────────────────────────────────────────────────────────
// Result side (discovery mode)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchConfidence {
    High,
    Medium,
}

/// One scheme the applicant appears eligible for in discovery mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleScheme {
    pub name: String,
    pub category: String,
    pub match_reason: String,
    pub confidence: MatchConfidence,
    pub benefits: String,
}
