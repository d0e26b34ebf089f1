//! Signup Types - Pure type definitions
//!
//! Records kept by the submission store and the payloads used to create them.
//! No async runtime or storage dependencies live here.

pub mod contact;
pub mod newsletter;

pub use contact::*;
pub use newsletter::*;
