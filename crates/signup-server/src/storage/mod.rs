//! Storage layer
//!
//! `MemoryStore` keeps submissions in process memory.
//! `SqliteStore` persists them to an embedded SQLite file.

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;
