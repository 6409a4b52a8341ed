//! Newsdesk Common Library
//!
//! Shared code for the Newsdesk dashboards including:
//! - Remote data client with strict envelope decoding
//! - Domain models for authors, articles and web stories
//! - Injectable query cache
//! - Error types and handling
//! - Configuration management
//! - Metrics and logging setup

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use api::{ApiClient, MockTransport, Transport};
pub use cache::{QueryCache, QueryKey};
pub use config::AppConfig;
pub use errors::{AppError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
