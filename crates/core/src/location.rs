//! Location field registry and constants.

use crate::filter::{FieldKind, FilterField};

/// Relation name under which a location's departments are included.
pub const DEPARTMENTS_RELATION: &str = "departments";

/// Filterable properties of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Id,
    Name,
    Address,
    City,
    Country,
    CreatedAt,
    UpdatedAt,
}

impl FilterField for LocationField {
    const FIELDS: &'static [Self] = &[
        Self::Id,
        Self::Name,
        Self::Address,
        Self::City,
        Self::Country,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];
    const ID: Self = Self::Id;
    const RELATIONS: &'static [&'static str] = &[DEPARTMENTS_RELATION];

    fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Address => "address",
            Self::City => "city",
            Self::Country => "country",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn column(&self) -> &'static str {
        self.name()
    }

    fn kind(&self) -> FieldKind {
        match self {
            Self::Id => FieldKind::Integer,
            Self::CreatedAt | Self::UpdatedAt => FieldKind::Timestamp,
            _ => FieldKind::Text,
        }
    }
}
