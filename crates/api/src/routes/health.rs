use axum::extract::State;
use axum::{routing::get, Json, Router};
use autocatalog_db::CatalogCounts;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Stored vehicles, accessories and manufacturers; absent when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogCounts>,
}

/// GET /health -- service status plus the size of the catalog.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = match autocatalog_db::catalog_counts(&state.pool).await {
        Ok(counts) => Some(counts),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = catalog.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        catalog,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
