//! # plugpad-api
//!
//! HTTP surface of the Plugpad emulator built on Axum.
//!
//! Provides the route table, handlers, request-logging middleware, error
//! mapping, the SSE push channel, and the listener binding with its
//! port-conflict fallback.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::bind_listener;
pub use state::AppState;
