use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: autocatalog_db::DbPool,
    /// Server configuration (the public base URL is read by search handlers).
    pub config: Arc<ServerConfig>,
}
