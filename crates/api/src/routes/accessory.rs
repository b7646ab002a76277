//! Route definitions for the `/accessories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::accessory;
use crate::state::AppState;

/// Routes mounted at `/accessories`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /search          -> search
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(accessory::list).post(accessory::create))
        .route("/search", get(accessory::search))
        .route(
            "/{id}",
            get(accessory::get_by_id)
                .put(accessory::update)
                .delete(accessory::delete),
        )
}
