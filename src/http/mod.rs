//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request tracing)
//!     → health.rs (GET /api/health)
//!     → response.rs (JSON 404 for everything else)
//!     → Send to client
//! ```

pub mod health;
pub mod response;
pub mod server;

pub use health::{HealthResponse, SERVICE_NAME};
pub use server::{AppState, HttpServer};
