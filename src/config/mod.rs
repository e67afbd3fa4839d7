//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)
//!     → loader.rs (hydrate process environment)
//!     → schema.rs (clap: CLI flags, then env vars, then defaults)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared by value with the prober and the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is read once at process start and never reloaded
//! - All fields have defaults so the service boots with no environment
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
