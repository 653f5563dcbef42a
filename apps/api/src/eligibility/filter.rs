//! Context Filter — narrows the policy store to the records worth sending to
//! the reasoning service, and serializes them into the prompt context block.
//!
//! Selection is deliberately simple text matching over the store, in
//! insertion order, with no ranking or limit. Nationwide records always pass.
//! Region-scoped records pass when the applicant's location contains the
//! record's region (case-insensitive substring). In analysis mode the
//! selected scheme's own record always passes too, so a location mismatch is
//! classified as "Not Eligible" instead of an unknown policy.

use crate::policy::{PolicyRecord, PolicyStore};

/// Filters the store for a single-scheme analysis request.
pub fn analysis_context<'a>(
    store: &'a PolicyStore,
    location: &str,
    scheme: &str,
) -> Vec<&'a PolicyRecord> {
    let location = location.to_lowercase();
    let scheme = scheme.to_lowercase();

    store
        .records()
        .iter()
        .filter(|p| {
            p.is_nationwide()
                || location.contains(&p.region.to_lowercase())
                || scheme.contains(&p.name.to_lowercase())
        })
        .collect()
}

/// Filters the store for a discovery request. No scheme clause: only
/// nationwide records and records scoped to the applicant's region pass.
pub fn discovery_context<'a>(store: &'a PolicyStore, location: &str) -> Vec<&'a PolicyRecord> {
    let location = location.to_lowercase();

    store
        .records()
        .iter()
        .filter(|p| p.is_nationwide() || location.contains(&p.region.to_lowercase()))
        .collect()
}

/// Serializes filtered records into the numbered context block embedded in
/// the system instruction. Deterministic for fixed inputs.
pub fn render_context(records: &[&PolicyRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. SCHEME: {} [Region: {}]\n{}",
                i + 1,
                p.name,
                p.region,
                p.rules
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
