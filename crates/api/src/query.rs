//! Raw query parameter types for API handlers.
//!
//! Both parameters carry URL-encoded JSON. They are parsed into typed
//! predicates by the extractors in [`crate::extract`].

use serde::Deserialize;

/// `?filter=<json>`
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub filter: Option<String>,
}

/// `?where=<json>`
#[derive(Debug, Default, Deserialize)]
pub struct WhereParams {
    #[serde(rename = "where")]
    pub where_clause: Option<String>,
}
