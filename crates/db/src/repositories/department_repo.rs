//! Repository for the `departments` table.
//!
//! Writes go through [`LocationDepartmentRepo`](super::LocationDepartmentRepo);
//! this repository only serves unscoped reads.

use std::collections::HashMap;

use ems_core::types::DbId;
use sqlx::PgPool;

use crate::models::department::Department;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, description, location_id, created_at, updated_at";

pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Find a department by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the departments of several locations at once, keyed by location id.
    ///
    /// Each list is ordered by department id. Locations without departments
    /// have no entry.
    pub async fn list_by_locations(
        pool: &PgPool,
        location_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Department>>, sqlx::Error> {
        if location_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM departments \
             WHERE location_id = ANY($1) \
             ORDER BY location_id, id"
        );
        let rows = sqlx::query_as::<_, Department>(&query)
            .bind(location_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Department>> = HashMap::new();
        for department in rows {
            grouped
                .entry(department.location_id)
                .or_default()
                .push(department);
        }
        Ok(grouped)
    }
}
