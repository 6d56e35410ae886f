//! # plugpad-store
//!
//! Durable key/value state for the loaded plugin, backed by a single JSON
//! file and mirrored in memory for fast reads.

pub mod store;

pub use store::PersistentStore;
