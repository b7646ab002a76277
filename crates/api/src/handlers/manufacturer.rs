//! Handlers for the `/manufacturers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use autocatalog_core::error::CoreError;
use autocatalog_core::manufacturer::{ManufacturerSortField, ENTITY, RESOURCE};
use autocatalog_db::models::manufacturer::{Manufacturer, ManufacturerInput};
use autocatalog_db::repositories::ManufacturerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, SearchQuery, ValidatedJson};
use crate::handlers::log_refused_delete;
use crate::response::{created, Created, ManufacturerSearchResponse, PageMeta};
use crate::state::AppState;

/// GET /manufacturers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Manufacturer>>> {
    let manufacturers = ManufacturerRepo::list(&state.pool).await?;
    Ok(Json(manufacturers))
}

/// GET /manufacturers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Manufacturer>> {
    let manufacturer = ManufacturerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(manufacturer))
}

/// GET /manufacturers/search
pub async fn search(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery,
) -> AppResult<Json<ManufacturerSearchResponse>> {
    let request = params.into_request::<ManufacturerSortField>()?;
    let page = ManufacturerRepo::search(&state.pool, &request).await?;
    let meta = PageMeta::build(&request, &page, &state.config.public_base_url, RESOURCE);
    Ok(Json(ManufacturerSearchResponse {
        manufacturers: page.items,
        total_manufacturers: page.total_items,
        meta,
    }))
}

/// POST /manufacturers
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ManufacturerInput>,
) -> AppResult<Created<Manufacturer>> {
    let manufacturer = ManufacturerRepo::create(&state.pool, &input).await?;
    tracing::info!(manufacturer_id = manufacturer.id, "Manufacturer created");
    Ok(created(RESOURCE, manufacturer.id, manufacturer))
}

/// PUT /manufacturers/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ManufacturerInput>,
) -> AppResult<Json<Manufacturer>> {
    let manufacturer = ManufacturerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    tracing::info!(manufacturer_id = id, "Manufacturer updated");
    Ok(Json(manufacturer))
}

/// DELETE /manufacturers/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    let result = ManufacturerRepo::delete(&state.pool, id).await;
    log_refused_delete(&result, ENTITY, id);
    result?;
    tracing::info!(manufacturer_id = id, "Manufacturer deleted");
    Ok(StatusCode::NO_CONTENT)
}
