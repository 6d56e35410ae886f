//! # plugpad-plugin
//!
//! Host side of the plugin contract: loading the compiled backend artifact,
//! building the capability context handed to it, and dispatching inbound
//! events into it.

pub mod context;
pub mod host;
pub mod loader;

pub use context::HostContext;
pub use host::PluginHost;
pub use loader::{BackendLoader, LoadedBackend};
