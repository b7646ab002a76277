//! Handlers for the `/vehicles` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use autocatalog_core::error::CoreError;
use autocatalog_core::vehicle::{VehicleSortField, ENTITY, RESOURCE};
use autocatalog_db::models::vehicle::{Vehicle, VehicleInput};
use autocatalog_db::repositories::VehicleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, SearchQuery, ValidatedJson};
use crate::handlers::log_refused_delete;
use crate::response::{created, Created, PageMeta, VehicleSearchResponse};
use crate::state::AppState;

/// GET /vehicles
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = VehicleRepo::list(&state.pool).await?;
    Ok(Json(vehicles))
}

/// GET /vehicles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Vehicle>> {
    let vehicle = VehicleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(vehicle))
}

/// GET /vehicles/search
///
/// `q` matches model or country of assembly.
pub async fn search(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery,
) -> AppResult<Json<VehicleSearchResponse>> {
    let request = params.into_request::<VehicleSortField>()?;
    let page = VehicleRepo::search(&state.pool, &request).await?;
    let meta = PageMeta::build(&request, &page, &state.config.public_base_url, RESOURCE);
    Ok(Json(VehicleSearchResponse {
        vehicles: page.items,
        total_vehicles: page.total_items,
        meta,
    }))
}

/// POST /vehicles
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<VehicleInput>,
) -> AppResult<Created<Vehicle>> {
    let vehicle = VehicleRepo::create(&state.pool, &input).await?;
    tracing::info!(vehicle_id = vehicle.id, "Vehicle created");
    Ok(created(RESOURCE, vehicle.id, vehicle))
}

/// PUT /vehicles/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<VehicleInput>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    tracing::info!(vehicle_id = id, "Vehicle updated");
    Ok(Json(vehicle))
}

/// DELETE /vehicles/{id}
///
/// 409 while any accessory is still assigned to the vehicle.
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    let result = VehicleRepo::delete(&state.pool, id).await;
    log_refused_delete(&result, ENTITY, id);
    result?;
    tracing::info!(vehicle_id = id, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
