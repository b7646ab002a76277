pub mod accessory;
pub mod manufacturer;
pub mod vehicle;

use autocatalog_core::error::CoreError;
use autocatalog_core::types::DbId;
use autocatalog_db::error::RepoError;

/// Log a delete that was refused because other records still point at the target.
pub(crate) fn log_refused_delete(result: &Result<(), RepoError>, entity: &str, id: DbId) {
    if let Err(RepoError::Core(CoreError::Conflict(reason))) = result {
        tracing::warn!(entity, id, %reason, "Delete refused");
    }
}
