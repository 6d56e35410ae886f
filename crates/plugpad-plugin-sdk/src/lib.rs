//! # plugpad-plugin-sdk
//!
//! SDK for developing Plugpad-hostable plugin backends.
//!
//! A backend is a `cdylib` crate that implements [`PluginBackend`] and
//! exports a constructor with [`export_backend!`]. The host hands the
//! backend an [`ExtensionContext`] during setup; everything the backend can
//! do — messaging, storage, the AI proxy, UI pushes, event registration —
//! goes through that context.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use plugpad_plugin_sdk::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct MyBackend;
//!
//! #[async_trait]
//! impl PluginBackend for MyBackend {
//!     fn info(&self) -> BackendInfo {
//!         BackendInfo::new("my-backend", "0.1.0")
//!     }
//!
//!     async fn setup(&self, cx: Arc<dyn ExtensionContext>) -> Result<(), String> {
//!         cx.on_message(Arc::new(EchoHandler));
//!         Ok(())
//!     }
//! }
//!
//! plugpad_plugin_sdk::export_backend!(MyBackend::default());
//! ```

pub mod backend;
pub mod context;
pub mod events;
pub mod macros;

pub use backend::{BackendInfo, PluginBackend};
pub use context::{ExtensionContext, FnMessageHandler, MessageHandler, WebhookHandler};
pub use events::{MessageEvent, ScheduleSpec, WebhookEvent};

/// Symbol name the host looks up in a compiled backend artifact.
pub const CREATE_BACKEND_SYMBOL: &[u8] = b"create_plugin";

/// Type of the constructor exported by backend artifacts.
pub type CreateBackendFn = unsafe extern "C" fn() -> *mut dyn PluginBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use std::sync::Arc;

    pub use async_trait::async_trait;

    pub use plugpad_chat::{Message, MessageUser};
    pub use plugpad_core::types::ScheduleId;

    pub use crate::backend::{BackendInfo, PluginBackend};
    pub use crate::context::{ExtensionContext, FnMessageHandler, MessageHandler, WebhookHandler};
    pub use crate::events::{MessageEvent, ScheduleSpec, WebhookEvent};
}
