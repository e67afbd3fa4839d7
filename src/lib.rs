//! Code Fixer Agent.
//!
//! An HTTP service that refuses to start unless SonarQube is reachable and
//! then answers a single health-check endpoint.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Logger;
