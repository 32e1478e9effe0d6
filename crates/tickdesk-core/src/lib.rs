//! Tickdesk Core — domain models, repository trait definitions, and the
//! authorization policy shared across all crates.

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;

pub use error::{TickdeskError, TickdeskResult};
