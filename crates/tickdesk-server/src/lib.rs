//! Tickdesk Server — the REST API over the ticket system.
//!
//! Exposed as a library so integration tests can drive the router
//! directly; the binary entry point lives in `main.rs`.

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
