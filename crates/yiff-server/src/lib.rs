//! HTTP server for yiff.
//!
//! Exposes the variable-level YAML diff over HTTP: `POST /diff` with two
//! YAML documents returns `{"variables": [...]}`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::DiffRequest;
pub use router::build_router;
pub use server::YiffServer;

/// HTTP endpoint paths.
pub mod endpoints {
    pub const DIFF: &str = "/diff";
    pub const HEALTH: &str = "/health";
}
