use thiserror::Error;

/// Errors from session store operations (used by trait definitions in
/// dungeonduel-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,

    #[error("persistence error: {0}")]
    Persistence(String),
}
