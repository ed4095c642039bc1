//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "count": n }` body returned by count and bulk mutation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountResponse {
    pub count: u64,
}
