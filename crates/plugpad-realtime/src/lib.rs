//! # plugpad-realtime
//!
//! Tracks currently-connected push-channel viewers and fans broadcasts out
//! to all of them, best-effort per viewer.

pub mod registry;

pub use registry::ViewerRegistry;
