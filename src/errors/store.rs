use thiserror::Error;
use std::io;
use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed data file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Username {0} already exists")]
    AlreadyExists(String),

    #[error("Invalid amount {0}: must be a non-negative number")]
    InvalidAmount(f64),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
