//! Has-many relation accessor: the departments of one location.
//!
//! Every query issued through [`LocationDepartmentRepo`] is narrowed with
//! `location_id = <parent>`. Inserts always bind the parent id and patches
//! never write the foreign key, so rows cannot leave the scope they were
//! reached through.

use ems_core::department::DepartmentField;
use ems_core::filter::{Filter, Scalar, Where};
use ems_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::query;
use crate::repositories::department_repo::COLUMNS;

/// Department repository scoped to a single location.
#[derive(Debug, Clone, Copy)]
pub struct LocationDepartmentRepo<'a> {
    pool: &'a PgPool,
    location_id: DbId,
}

impl<'a> LocationDepartmentRepo<'a> {
    pub fn new(pool: &'a PgPool, location_id: DbId) -> Self {
        Self { pool, location_id }
    }

    /// Narrow a caller predicate to this location.
    fn scope(&self, where_clause: &Where<DepartmentField>) -> Where<DepartmentField> {
        where_clause
            .clone()
            .and_eq(DepartmentField::Location, Scalar::Integer(self.location_id))
    }

    /// List this location's departments matching `filter`.
    pub async fn find(
        &self,
        filter: &Filter<DepartmentField>,
    ) -> Result<Vec<Department>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM departments"));
        query::push_where(&mut qb, &self.scope(&filter.where_clause));
        query::push_order_and_page(&mut qb, filter);
        tracing::trace!(location_id = self.location_id, sql = qb.sql(), "Listing departments");
        qb.build_query_as::<Department>().fetch_all(self.pool).await
    }

    /// Insert a department owned by this location, returning the created row.
    ///
    /// `input.location_id` is ignored; callers validate it against the
    /// scope beforehand.
    pub async fn create(&self, input: &CreateDepartment) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (description, location_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.description)
            .bind(self.location_id)
            .fetch_one(self.pool)
            .await
    }

    /// Partially update this location's departments matching `where_clause`.
    ///
    /// Returns the number of rows affected.
    pub async fn patch(
        &self,
        input: &UpdateDepartment,
        where_clause: &Where<DepartmentField>,
    ) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE departments SET updated_at = NOW()");
        for (column, value) in [("name", &input.name), ("description", &input.description)] {
            if let Some(value) = value {
                qb.push(", ").push(column).push(" = ").push_bind(value.clone());
            }
        }
        query::push_where(&mut qb, &self.scope(where_clause));
        let result = qb.build().execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete this location's departments matching `where_clause`.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete(&self, where_clause: &Where<DepartmentField>) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM departments");
        query::push_where(&mut qb, &self.scope(where_clause));
        let result = qb.build().execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
