//! Export macro for compiled backend artifacts.

/// Exports the `create_plugin` constructor the host looks up when loading
/// a backend artifact.
///
/// # Example
/// ```rust,ignore
/// plugpad_plugin_sdk::export_backend!(MyBackend::default());
/// ```
#[macro_export]
macro_rules! export_backend {
    ($ctor:expr) => {
        #[unsafe(no_mangle)]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn create_plugin() -> *mut dyn $crate::PluginBackend {
            let backend: Box<dyn $crate::PluginBackend> = Box::new($ctor);
            Box::into_raw(backend)
        }
    };
}
