//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober, startup, handlers
//!     → logging::Logger (origin tag + colored message + JSON payload)
//!     → tracing macros at the matching level
//!     → logging::ConsoleFormat ("<IST timestamp> - <LEVEL> - <message>")
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Human-readable console text only, no JSON output
//! - Timestamps are always Asia/Kolkata, whatever the host zone
//! - Level filter comes from `RUST_LOG`

pub mod logging;

pub use logging::{init_logging, logger, LogLevel, Logger, Record};
