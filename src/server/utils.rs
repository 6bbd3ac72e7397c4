//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::RecordOpsError;

impl HttpServer {
    /// Readable error for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> RecordOpsError {
        let error_str = error.to_string();

        if error.kind() == std::io::ErrorKind::AddrInUse
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            RecordOpsError::server(format!(
                "Port {} is already in use; set server.port or RECORDOPS_PORT (e.g. {})",
                port,
                port.saturating_add(1)
            ))
        } else if error.kind() == std::io::ErrorKind::PermissionDenied
            || error_str.contains("os error 13")
        {
            RecordOpsError::server(format!(
                "Permission denied for port {}; use a port >= 1024",
                port
            ))
        } else {
            RecordOpsError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
