//! Error types for the signup service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SignupError>;

#[derive(Error, Debug)]
pub enum SignupError {
    /// The backing resource of a store failed. Callers decide whether to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Config error: {0}")]
    Config(String),
}
