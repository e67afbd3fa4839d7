//! Startup orchestration.
//!
//! # Responsibilities
//! - Verify SonarQube answers before anything is served
//! - Turn a failed probe into a fatal error naming the URL
//!
//! # Design Decisions
//! - Returns a `Result` instead of aborting, so the caller owns the exit
//! - A single probe decides; there is no retry

use thiserror::Error;

use crate::health::{ProbeOutcome, SonarQubeProbe};
use crate::observability::Logger;

const ORIGIN: &str = "startup_event";

/// Fatal conditions that stop the agent from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "CRITICAL: SonarQube is not running or not accessible at {url}. \
         Please start SonarQube before running this application."
    )]
    SonarQubeUnreachable { url: String, outcome: ProbeOutcome },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// Probe SonarQube and fail unless it is reachable.
pub async fn run_startup_checks(
    probe: &SonarQubeProbe,
    logger: &Logger,
) -> Result<ProbeOutcome, StartupError> {
    logger.info("Starting application...", Some(ORIGIN), None);

    let outcome = probe.check().await;
    if !outcome.is_connected() {
        let err = StartupError::SonarQubeUnreachable {
            url: probe.base_url().to_string(),
            outcome,
        };
        logger.error(&err.to_string(), Some(ORIGIN), None);
        return Err(err);
    }

    logger.info("Application startup completed successfully", Some(ORIGIN), None);
    Ok(outcome)
}
