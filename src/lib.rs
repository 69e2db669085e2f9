//! users-api: a small JSON service exposing a health probe and a read-only
//! user directory.
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! build the same router in-process through [`routes::create_router`].

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod users;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::{create_router, App};
pub use state::AppState;
