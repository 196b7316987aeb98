//! Shared types for meshi
//!
//! Error system, domain models and small utilities used by the server and
//! by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
