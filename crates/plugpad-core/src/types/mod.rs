//! Shared domain types.

pub mod id;

pub use id::{MessageId, ScheduleId, ViewerId};
