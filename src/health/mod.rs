//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (probe.rs):
//!     GET <base_url>/api/system/status, bounded by a fixed timeout
//!     → classify into a ProbeOutcome
//!     → log the outcome
//!     → lifecycle::startup decides whether the process may serve
//! ```
//!
//! # Design Decisions
//! - One attempt only: no retries, no backoff
//! - Timeouts are classified before connection errors
//! - Only the `status` field of the response is read

pub mod probe;

pub use probe::{ProbeOutcome, SonarQubeProbe, PROBE_TIMEOUT, STATUS_PATH};
