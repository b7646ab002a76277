pub mod accessory;
pub mod health;
pub mod manufacturer;
pub mod vehicle;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vehicles                        list, create
/// /vehicles/search                 paged search
/// /vehicles/{id}                   get, replace, delete
///
/// /accessories                     list, create
/// /accessories/search              paged search
/// /accessories/{id}                get, replace, delete
///
/// /manufacturers                   list, create
/// /manufacturers/search            paged search
/// /manufacturers/{id}              get, replace, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle::router())
        .nest("/accessories", accessory::router())
        .nest("/manufacturers", manufacturer::router())
}
