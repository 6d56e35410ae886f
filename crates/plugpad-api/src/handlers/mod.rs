//! HTTP request handlers, organized by domain.

pub mod assets;
pub mod events;
pub mod messages;
pub mod storage;
pub mod users;
