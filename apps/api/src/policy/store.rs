use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Region value marking a scheme as applicable nationwide rather than to a
/// single state/UT.
pub const NATIONWIDE_REGION: &str = "All India";

/// The policy database shipped with the binary. No file or network load at
/// runtime — the JSON is embedded at build time.
const POLICY_ASSET: &str = include_str!("../../assets/policies.json");

/// One entry in the reference database. `rules` is free-text prose — the
/// eligibility conditions are interpreted by the reasoning service, never
/// parsed locally.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRecord {
    pub name: String,
    pub region: String,
    pub description: String,
    pub rules: String,
}

impl PolicyRecord {
    pub fn is_nationwide(&self) -> bool {
        self.region == NATIONWIDE_REGION
    }
}

#[derive(Debug, Deserialize)]
struct PolicyAsset {
    states: Vec<String>,
    policies: Vec<PolicyRecord>,
}

/// Read-only, in-memory policy table plus the selectable region and scheme
/// lists the form layer needs.
#[derive(Debug)]
pub struct PolicyStore {
    records: Vec<PolicyRecord>,
    states: Vec<String>,
    scheme_names: Vec<String>,
}

impl PolicyStore {
    /// Parses the bundled asset and validates store invariants.
    /// Fails startup on malformed JSON, duplicate scheme names, or empty
    /// rules blocks.
    pub fn load() -> Result<Self> {
        Self::from_json(POLICY_ASSET)
    }

    fn from_json(json: &str) -> Result<Self> {
        let asset: PolicyAsset =
            serde_json::from_str(json).context("Failed to parse policy database asset")?;

        let mut seen = HashSet::new();
        for record in &asset.policies {
            if !seen.insert(record.name.as_str()) {
                bail!("Duplicate scheme name in policy database: {}", record.name);
            }
            if record.rules.trim().is_empty() {
                bail!("Scheme '{}' has an empty rules block", record.name);
            }
        }

        // Selectable scheme names, sorted for the dropdown.
        let mut scheme_names: Vec<String> =
            asset.policies.iter().map(|p| p.name.clone()).collect();
        scheme_names.sort();

        Ok(Self {
            records: asset.policies,
            states: asset.states,
            scheme_names,
        })
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    /// Selectable states/UTs for the location field.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Scheme names, sorted alphabetically.
    pub fn scheme_names(&self) -> &[String] {
        &self.scheme_names
    }

    /// Exact-name lookup.
    pub fn find(&self, name: &str) -> Option<&PolicyRecord> {
        self.records.iter().find(|p| p.name == name)
    }
}
