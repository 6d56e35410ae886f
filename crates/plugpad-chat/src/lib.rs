//! # plugpad-chat
//!
//! The emulated conversation: an append-only [`log::MessageLog`], the
//! mention syntax parser, and the in-memory roster of simulated users.
//!
//! The emulation models exactly one workspace with exactly one channel.

pub mod log;
pub mod mentions;
pub mod message;
pub mod roster;

pub use log::{DEFAULT_RECENT_LIMIT, MessageLog};
pub use message::{Message, MessageDraft, MessageUser, User};
pub use roster::{DEFAULT_USER_ID, UserRoster};

/// The single workspace the emulation simulates.
pub const WORKSPACE_ID: &str = "workspace-local";

/// The single conversation channel in that workspace.
pub const CHANNEL_ID: &str = "channel-general";
