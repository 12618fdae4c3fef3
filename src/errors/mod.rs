// Application error type and result alias built on thiserror.
use thiserror::Error;

pub mod response;
pub mod store;

pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    // Storage failures surface as a recoverable error instead of taking the server down.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type AppResult<T> = Result<T, AppError>;
