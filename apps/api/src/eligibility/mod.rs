//! Eligibility domain — everything between the submitted form and the typed
//! verdict.
//!
//! Flow: validate request → filter policy context → build prompt + response
//! schema → single reasoning call → validating decode → result (or the fixed
//! fallback in analysis mode).

pub mod filter;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod service;
