//! Repository for the `locations` table.

use ems_core::filter::{Filter, Scalar, Where};
use ems_core::location::LocationField;
use ems_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::location::{
    CreateLocation, Location, LocationWithDepartments, ReplaceLocation, UpdateLocation,
};
use crate::query;
use crate::repositories::{DepartmentRepo, LocationDepartmentRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, city, country, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, address, city, country) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM locations WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List locations matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &Filter<LocationField>,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM locations"));
        query::push_where(&mut qb, &filter.where_clause);
        query::push_order_and_page(&mut qb, filter);
        tracing::trace!(sql = qb.sql(), "Listing locations");
        qb.build_query_as::<Location>().fetch_all(pool).await
    }

    /// List locations matching `filter`, each with its departments.
    pub async fn list_with_departments(
        pool: &PgPool,
        filter: &Filter<LocationField>,
    ) -> Result<Vec<LocationWithDepartments>, sqlx::Error> {
        let locations = Self::list(pool, filter).await?;
        let ids: Vec<DbId> = locations.iter().map(|l| l.id).collect();
        let mut departments = DepartmentRepo::list_by_locations(pool, &ids).await?;

        Ok(locations
            .into_iter()
            .map(|location| LocationWithDepartments {
                departments: departments.remove(&location.id).unwrap_or_default(),
                location,
            })
            .collect())
    }

    /// Find a location by ID together with its departments.
    pub async fn find_by_id_with_departments(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LocationWithDepartments>, sqlx::Error> {
        let Some(location) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let departments = DepartmentRepo::list_by_locations(pool, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(LocationWithDepartments {
            location,
            departments,
        }))
    }

    /// Count locations matching `where_clause`.
    pub async fn count(
        pool: &PgPool,
        where_clause: &Where<LocationField>,
    ) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM locations");
        query::push_where(&mut qb, where_clause);
        let (count,): (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(count.max(0) as u64)
    }

    /// Apply a partial update to every location matching `where_clause`.
    ///
    /// Only non-`None` fields are written; `updated_at` is always refreshed.
    /// Returns the number of rows affected.
    pub async fn update_all(
        pool: &PgPool,
        input: &UpdateLocation,
        where_clause: &Where<LocationField>,
    ) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE locations SET updated_at = NOW()");
        let assignments = [
            ("name", &input.name),
            ("address", &input.address),
            ("city", &input.city),
            ("country", &input.country),
        ];
        for (column, value) in assignments {
            if let Some(value) = value {
                qb.push(", ").push(column).push(" = ").push_bind(value.clone());
            }
        }
        query::push_where(&mut qb, where_clause);
        tracing::trace!(sql = qb.sql(), "Bulk location update");
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Partially update one location. Returns `false` if no row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<bool, sqlx::Error> {
        let by_id = Where::default().and_eq(LocationField::Id, Scalar::Integer(id));
        Ok(Self::update_all(pool, input, &by_id).await? > 0)
    }

    /// Replace every mutable column of one location; omitted optional fields
    /// become NULL. `input.id` is not written. Returns `false` if no row has `id`.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &ReplaceLocation,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE locations SET \
                name = $2, \
                address = $3, \
                city = $4, \
                country = $5, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.country)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a location and, through the foreign key cascade, its departments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Departments of one location, as a repository scoped to it.
    pub fn departments(pool: &PgPool, location_id: DbId) -> LocationDepartmentRepo<'_> {
        LocationDepartmentRepo::new(pool, location_id)
    }
}
