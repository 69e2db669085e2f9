//! HTTP/HTTPS server startup logic.
//!
//! Supports two TLS modes:
//! - None: Plain HTTP
//! - Manual: User-provided certificate files

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Request;
use axum::ServiceExt;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{HttpServerConfig, TlsMode};
use crate::routes::App;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Parse `host:port` into a socket address.
pub fn listen_addr(config: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Address(format!("{}:{}: {}", config.host, config.port, e)))
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: App, config: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = listen_addr(config)?;
    let handle = Handle::new();
    let grace = Duration::from_secs(config.shutdown_timeout_seconds);

    match (&config.tls.mode, &config.tls.cert_path, &config.tls.key_path) {
        (TlsMode::None, _, _) => start_plain_server(app, addr, handle, grace).await,
        (TlsMode::Manual, Some(cert_path), Some(key_path)) => {
            start_manual_tls_server(app, addr, cert_path, key_path, handle, grace).await
        }
        (TlsMode::Manual, _, _) => Err(ServerError::TlsConfig(
            "manual TLS mode requires cert_path and key_path".to_string(),
        )),
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: App,
    addr: SocketAddr,
    handle: Handle,
    grace: Duration,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server (no TLS)");

    shutdown::setup_shutdown_handler(handle.clone(), grace);

    axum_server::bind(addr)
        .handle(handle)
        .serve(ServiceExt::<Request>::into_make_service(app))
        .await?;
    Ok(())
}

/// Start HTTPS server with user-provided certificates.
async fn start_manual_tls_server(
    app: App,
    addr: SocketAddr,
    cert_path: &str,
    key_path: &str,
    handle: Handle,
    grace: Duration,
) -> Result<(), ServerError> {
    tracing::info!(%addr, cert = %cert_path, key = %key_path, "Starting HTTPS server (manual certs)");

    let rustls_config = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    shutdown::setup_shutdown_handler(handle.clone(), grace);

    // Certificates can be rotated on disk and picked up with SIGHUP
    shutdown::setup_reload_handler(
        rustls_config.clone(),
        cert_path.to_string(),
        key_path.to_string(),
    );

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(ServiceExt::<Request>::into_make_service(app))
        .await?;
    Ok(())
}
