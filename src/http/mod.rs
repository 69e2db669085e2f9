//! HTTP server module with optional TLS.
//!
//! This module provides server functionality with two modes:
//! - **None (default)**: Plain HTTP, for development or behind a reverse proxy
//! - **Manual**: User-provided certificate and key files
//!
//! The server includes:
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Certificate hot-reload via SIGHUP (manual mode)

mod server;
mod shutdown;

pub use server::{listen_addr, start_server, ServerError};
