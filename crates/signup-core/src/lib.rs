//! Signup Core Library
//!
//! Error type and the storage port implemented by the submission store
//! backends.

// Re-export pure types from signup-types
pub use signup_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, SignupError};
pub use ports::{ContactStore, NewsletterStore, SubmissionStore};
