//! Handlers for the `/locations` resource.
//!
//! Every read of a location includes its departments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ems_core::error::CoreError;
use ems_core::filter::Filter;
use ems_core::location::LocationField;
use ems_core::relation::constrain_id;
use ems_core::types::DbId;
use ems_db::models::location::{
    CreateLocation, Location, LocationWithDepartments, ReplaceLocation, UpdateLocation,
};
use ems_db::repositories::LocationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{FilterQuery, ValidatedJson, WhereQuery};
use crate::query::FilterParams;
use crate::response::CountResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Location",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /locations
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateLocation>,
) -> AppResult<Json<Location>> {
    let location = LocationRepo::create(&state.pool, &input).await?;
    tracing::debug!(location_id = location.id, "Location created");
    Ok(Json(location))
}

/// GET /locations/count?where={...}
pub async fn count(
    State(state): State<AppState>,
    WhereQuery(where_clause): WhereQuery<LocationField>,
) -> AppResult<Json<CountResponse>> {
    let count = LocationRepo::count(&state.pool, &where_clause).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /locations
///
/// Returns every location with its departments. A `filter` parameter is
/// validated but not applied.
pub async fn find(
    State(state): State<AppState>,
    FilterQuery(_filter): FilterQuery<LocationField>,
) -> AppResult<Json<Vec<LocationWithDepartments>>> {
    let locations = LocationRepo::list_with_departments(&state.pool, &Filter::default()).await?;
    Ok(Json(locations))
}

/// PATCH /locations?where={...}
pub async fn update_all(
    State(state): State<AppState>,
    WhereQuery(where_clause): WhereQuery<LocationField>,
    ValidatedJson(input): ValidatedJson<UpdateLocation>,
) -> AppResult<Json<CountResponse>> {
    let count = LocationRepo::update_all(&state.pool, &input, &where_clause).await?;
    tracing::debug!(count, "Locations patched");
    Ok(Json(CountResponse { count }))
}

/// GET /locations/{id}
///
/// The `filter` parameter may not carry `where`; it is otherwise validated
/// and ignored.
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<LocationWithDepartments>> {
    Filter::<LocationField>::from_query_excluding_where(params.filter.as_deref())
        .map_err(CoreError::from)?;
    let location = LocationRepo::find_by_id_with_departments(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(location))
}

/// PATCH /locations/{id}
pub async fn update_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLocation>,
) -> AppResult<StatusCode> {
    if !LocationRepo::update(&state.pool, id, &input).await? {
        return Err(not_found(id));
    }
    tracing::debug!(location_id = id, "Location patched");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /locations/{id}
///
/// Full replace; optional fields missing from the body are cleared. A body
/// `id` must equal the path id.
pub async fn replace_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<ReplaceLocation>,
) -> AppResult<StatusCode> {
    constrain_id(input.id, id)?;
    if !LocationRepo::replace(&state.pool, id, &input).await? {
        return Err(not_found(id));
    }
    tracing::debug!(location_id = id, "Location replaced");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /locations/{id}
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LocationRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::debug!(location_id = id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
