//! Key constraints for writes addressed by a path id.
//!
//! A record written through a has-many relation always belongs to the
//! parent the relation is scoped to, and a record replaced by id keeps that
//! id. A payload may repeat the id from the path but may not point
//! somewhere else.

use crate::error::CoreError;
use crate::types::DbId;

/// Resolve the foreign key for a write scoped to `parent_id`.
///
/// Returns `parent_id` when `supplied` is absent or equal to it, and a
/// validation error otherwise.
pub fn constrain_foreign_key(
    property: &'static str,
    supplied: Option<DbId>,
    parent_id: DbId,
) -> Result<DbId, CoreError> {
    pin(property, supplied, parent_id)
}

/// Resolve the primary key of a record replaced at `path_id`.
pub fn constrain_id(supplied: Option<DbId>, path_id: DbId) -> Result<DbId, CoreError> {
    pin("id", supplied, path_id)
}

fn pin(
    property: &'static str,
    supplied: Option<DbId>,
    expected: DbId,
) -> Result<DbId, CoreError> {
    match supplied {
        Some(value) if value != expected => Err(CoreError::Validation(format!(
            "Property '{property}' cannot be changed: expected {expected}, got {value}"
        ))),
        _ => Ok(expected),
    }
}
