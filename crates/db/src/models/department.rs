//! Department entity model and DTOs.
//!
//! The foreign key column `location_id` is exposed as `location` in JSON.

use ems_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "location")]
    pub location_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a department under a location.
///
/// `name` is not part of this payload and is rejected as an unknown
/// property. `location` may be omitted; the owning location comes from the
/// request path.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateDepartment {
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[serde(rename = "location")]
    pub location_id: Option<DbId>,
}

/// DTO for patching departments. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[serde(rename = "location")]
    pub location_id: Option<DbId>,
}
