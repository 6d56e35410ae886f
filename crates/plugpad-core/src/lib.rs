//! # plugpad-core
//!
//! Shared foundation for the Plugpad workspace: the unified [`error::AppError`]
//! type, configuration schemas, id newtypes, and the plugin manifest model.

pub mod config;
pub mod error;
pub mod manifest;
pub mod result;
pub mod types;
