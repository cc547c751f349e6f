//! Error types for the entity pool

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PoolError {
    #[error("No inactive entity available and auto-expansion is disabled")]
    Exhausted,

    #[error("Caller does not hold authority over the pool")]
    NotAuthoritative,

    #[error("Pool has no resolved entity type - call initialize first")]
    Unresolved,

    #[error("Entity factory failed: {0}")]
    Factory(String),

    #[error("Entity type resolution failed: {0}")]
    TypeResolution(String),

    #[error("Background construction task was cancelled")]
    Cancelled,
}

pub type PoolResult<T> = Result<T, PoolError>;
