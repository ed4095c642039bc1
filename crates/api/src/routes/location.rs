//! Route definitions for the `/locations` resource.
//!
//! Also nests the location-scoped department routes under
//! `/locations/{id}/departments`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{location, location_department};
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// POST   /                      -> create
/// GET    /                      -> find          (departments included, filter ignored)
/// PATCH  /                      -> update_all    (?where=)
/// GET    /count                 -> count         (?where=)
/// GET    /{id}                  -> find_by_id    (departments included)
/// PATCH  /{id}                  -> update_by_id  (204)
/// PUT    /{id}                  -> replace_by_id (204)
/// DELETE /{id}                  -> delete_by_id  (204)
///
/// GET    /{id}/departments      -> find          (?filter=)
/// POST   /{id}/departments      -> create
/// PATCH  /{id}/departments      -> patch         (?where=)
/// DELETE /{id}/departments      -> delete        (?where=)
/// ```
pub fn router() -> Router<AppState> {
    let department_routes = Router::new().route(
        "/",
        get(location_department::find)
            .post(location_department::create)
            .patch(location_department::patch)
            .delete(location_department::delete),
    );

    Router::new()
        .route(
            "/",
            get(location::find)
                .post(location::create)
                .patch(location::update_all),
        )
        .route("/count", get(location::count))
        .route(
            "/{id}",
            get(location::find_by_id)
                .patch(location::update_by_id)
                .put(location::replace_by_id)
                .delete(location::delete_by_id),
        )
        .nest("/{id}/departments", department_routes)
}
