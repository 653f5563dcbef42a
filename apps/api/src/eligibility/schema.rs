//! Response Schema — the declarative output contract sent alongside every
//! prompt. The reasoning service constrains its JSON to these shapes, and the
//! decoder in `service.rs` verifies the result against the matching types in
//! `models.rs`. Field names and enum values here are the wire contract — do
//! not rename them.

use serde_json::{json, Value};

/// Schema for analysis mode: a single verdict object.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "status": {
                "type": "STRING",
                "enum": ["Eligible", "Not Eligible", "Needs Review"]
            },
            "reason": {
                "type": "STRING",
                "description": "A high-level summary of why the status was chosen."
            },
            "criteriaBreakdown": {
                "type": "ARRAY",
                "description": "A list of specific criteria checked and their individual status.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "Name of the criterion (e.g., Income Limit)"
                        },
                        "met": {
                            "type": "BOOLEAN",
                            "description": "True if this specific criterion is met"
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "Short explanation (e.g., Income ₹2.5L is within ₹3L limit)"
                        }
                    }
                }
            },
            "summary": { "type": "STRING" },
            "policyReference": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "section": { "type": "STRING" },
                    "date": { "type": "STRING" }
                }
            },
            "relatedSchemes": {
                "type": "ARRAY",
                "description": "List of other schemes from the database that the applicant might be eligible for based on their profile.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "eligibilityProbability": {
                            "type": "STRING",
                            "enum": ["High", "Medium", "Low"]
                        },
                        "reason": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

/// Schema for discovery mode: an array of eligible-scheme matches.
pub fn discovery_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "category": { "type": "STRING" },
                "matchReason": {
                    "type": "STRING",
                    "description": "Why is the user eligible?"
                },
                "confidence": {
                    "type": "STRING",
                    "enum": ["High", "Medium"]
                },
                "benefits": {
                    "type": "STRING",
                    "description": "Short summary of benefits"
                }
            }
        }
    })
}
