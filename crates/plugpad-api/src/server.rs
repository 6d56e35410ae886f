//! Listener binding with port-conflict fallback.

use tokio::net::TcpListener;
use tracing::warn;

use plugpad_core::error::AppError;
use plugpad_core::result::AppResult;

/// Binds the configured address, falling back to an OS-assigned ephemeral
/// port when the requested one is occupied.
///
/// Two emulator instances for two plugin projects are a normal dev setup,
/// so an occupied port is a fallback case rather than an error. The caller
/// reads the actual port off the returned listener and logs it.
pub async fn bind_listener(host: &str, port: u16) -> AppResult<TcpListener> {
    let addr = format!("{host}:{port}");
    match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            warn!(
                requested = %addr,
                "Port occupied; falling back to an OS-assigned port"
            );
            TcpListener::bind(format!("{host}:0")).await.map_err(|e| {
                AppError::internal(format!("Failed to bind fallback port on {host}: {e}"))
            })
        }
        Err(e) => Err(AppError::internal(format!("Failed to bind {addr}: {e}"))),
    }
}
