//! HTTP handlers

pub mod contact;
pub mod error;
pub mod health;
pub mod newsletter;

pub use error::ApiError;
pub use health::health;
