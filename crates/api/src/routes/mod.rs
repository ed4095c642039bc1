pub mod health;
pub mod location;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /locations                          find, create, update_all
/// /locations/count                    count
/// /locations/{id}                     find_by_id, update_by_id, replace_by_id, delete_by_id
/// /locations/{id}/departments         find, create, patch, delete (scoped to the location)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/locations", location::router())
}
