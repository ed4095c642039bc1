//! Department field registry.
//!
//! The foreign key is exposed to clients as `location` and stored in the
//! `location_id` column.

use crate::filter::{FieldKind, FilterField};

/// JSON property carrying the parent location id.
pub const LOCATION_PROPERTY: &str = "location";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentField {
    Id,
    Name,
    Description,
    Location,
    CreatedAt,
    UpdatedAt,
}

impl FilterField for DepartmentField {
    const FIELDS: &'static [Self] = &[
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Location,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];
    const ID: Self = Self::Id;

    fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Location => LOCATION_PROPERTY,
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Location => "location_id",
            other => other.name(),
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            Self::Id | Self::Location => FieldKind::Integer,
            Self::Name | Self::Description => FieldKind::Text,
            Self::CreatedAt | Self::UpdatedAt => FieldKind::Timestamp,
        }
    }
}
