//! Location entity model and DTOs.

use ems_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::department::Department;

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A location serialized together with its departments.
#[derive(Debug, Clone, Serialize)]
pub struct LocationWithDepartments {
    #[serde(flatten)]
    pub location: Location,
    pub departments: Vec<Department>,
}

/// DTO for creating a location. The id is server-assigned and rejected as an
/// unknown property.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateLocation {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 255, message = "city must be at most 255 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 255, message = "country must be at most 255 characters"))]
    pub country: Option<String>,
}

/// DTO for a full replace. Omitted optional fields are cleared.
///
/// `id` may be present so a fetched location can be sent back as is; the
/// handler checks it against the path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReplaceLocation {
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 255, message = "city must be at most 255 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 255, message = "country must be at most 255 characters"))]
    pub country: Option<String>,
}

/// DTO for patching locations. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateLocation {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 255, message = "city must be at most 255 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 255, message = "country must be at most 255 characters"))]
    pub country: Option<String>,
}
