use autocatalog_core::error::CoreError;

/// Failure of a repository operation that enforces a domain rule.
///
/// Plain reads and single-statement writes return `sqlx::Error` directly;
/// operations that can be refused (dangling references, linked rows,
/// missing targets inside a transaction) return this instead.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
