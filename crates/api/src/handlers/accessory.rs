//! Handlers for the `/accessories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use autocatalog_core::accessory::{AccessorySortField, ENTITY, RESOURCE};
use autocatalog_core::error::CoreError;
use autocatalog_db::models::accessory::{Accessory, AccessoryInput};
use autocatalog_db::repositories::AccessoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, SearchQuery, ValidatedJson};
use crate::response::{created, AccessorySearchResponse, Created, PageMeta};
use crate::state::AppState;

/// GET /accessories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Accessory>>> {
    let accessories = AccessoryRepo::list(&state.pool).await?;
    Ok(Json(accessories))
}

/// GET /accessories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Accessory>> {
    let accessory = AccessoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(accessory))
}

/// GET /accessories/search
///
/// A numeric `q` matches acquisition year or installation minutes exactly;
/// any other `q` matches the name.
pub async fn search(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery,
) -> AppResult<Json<AccessorySearchResponse>> {
    let request = params.into_request::<AccessorySortField>()?;
    let page = AccessoryRepo::search(&state.pool, &request).await?;
    let meta = PageMeta::build(&request, &page, &state.config.public_base_url, RESOURCE);
    Ok(Json(AccessorySearchResponse {
        accessories: page.items,
        total_accessories: page.total_items,
        meta,
    }))
}

/// POST /accessories
///
/// 400 `DANGLING_REFERENCE` if the vehicle or any manufacturer does not exist.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<AccessoryInput>,
) -> AppResult<Created<Accessory>> {
    let accessory = AccessoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        accessory_id = accessory.id,
        manufacturers = accessory.manufacturers.len(),
        "Accessory created"
    );
    Ok(created(RESOURCE, accessory.id, accessory))
}

/// PUT /accessories/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<AccessoryInput>,
) -> AppResult<Json<Accessory>> {
    let accessory = AccessoryRepo::update(&state.pool, id, &input).await?;
    tracing::info!(accessory_id = id, "Accessory updated");
    Ok(Json(accessory))
}

/// DELETE /accessories/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    AccessoryRepo::delete(&state.pool, id).await?;
    tracing::info!(accessory_id = id, "Accessory deleted");
    Ok(StatusCode::NO_CONTENT)
}
