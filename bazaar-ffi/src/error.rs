//! Errors raised inside a boundary call before they are flattened into
//! [`FFIError`](crate::FFIError).

use bazaar_client::ClientError;
use thiserror::Error;

pub type BoundaryResult<T> = Result<T, BoundaryError>;

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0} is null")]
    NullPointer(&'static str),

    #[error("client runtime not initialized")]
    NotInitialized,

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("panic: {0}")]
    Panic(String),
}
