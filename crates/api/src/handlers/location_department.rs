//! Handlers for departments of a location.
//!
//! Nested under `/locations/{id}/departments`. All reads and writes go
//! through the relation accessor returned by [`LocationRepo::departments`].

use axum::extract::{Path, State};
use axum::Json;
use ems_core::department::{DepartmentField, LOCATION_PROPERTY};
use ems_core::error::CoreError;
use ems_core::relation::constrain_foreign_key;
use ems_core::types::DbId;
use ems_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use ems_db::repositories::LocationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{FilterQuery, ValidatedJson, WhereQuery};
use crate::response::CountResponse;
use crate::state::AppState;

/// GET /locations/{id}/departments?filter={...}
///
/// An unknown location yields an empty list.
pub async fn find(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
    FilterQuery(filter): FilterQuery<DepartmentField>,
) -> AppResult<Json<serde_json::Value>> {
    let departments = LocationRepo::departments(&state.pool, location_id)
        .find(&filter)
        .await?;
    let body = serde_json::to_value(departments)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize departments: {e}")))?;
    Ok(Json(filter.project(body)))
}

/// POST /locations/{id}/departments
///
/// `location` may be omitted or repeat the path id.
pub async fn create(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateDepartment>,
) -> AppResult<Json<Department>> {
    constrain_foreign_key(LOCATION_PROPERTY, input.location_id, location_id)?;
    if !LocationRepo::exists(&state.pool, location_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id: location_id,
        }));
    }

    let department = LocationRepo::departments(&state.pool, location_id)
        .create(&input)
        .await?;
    tracing::debug!(location_id, department_id = department.id, "Department created");
    Ok(Json(department))
}

/// PATCH /locations/{id}/departments?where={...}
pub async fn patch(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
    WhereQuery(where_clause): WhereQuery<DepartmentField>,
    ValidatedJson(input): ValidatedJson<UpdateDepartment>,
) -> AppResult<Json<CountResponse>> {
    constrain_foreign_key(LOCATION_PROPERTY, input.location_id, location_id)?;
    let count = LocationRepo::departments(&state.pool, location_id)
        .patch(&input, &where_clause)
        .await?;
    tracing::debug!(location_id, count, "Departments patched");
    Ok(Json(CountResponse { count }))
}

/// DELETE /locations/{id}/departments?where={...}
pub async fn delete(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
    WhereQuery(where_clause): WhereQuery<DepartmentField>,
) -> AppResult<Json<CountResponse>> {
    let count = LocationRepo::departments(&state.pool, location_id)
        .delete(&where_clause)
        .await?;
    tracing::debug!(location_id, count, "Departments deleted");
    Ok(Json(CountResponse { count }))
}
