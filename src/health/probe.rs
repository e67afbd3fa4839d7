//! SonarQube reachability probe.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::observability::Logger;

/// Status endpoint of the SonarQube web API.
pub const STATUS_PATH: &str = "/api/system/status";

/// Upper bound on the whole status request, body included.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

const ORIGIN: &str = "startup_event";

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// SonarQube answered 200; `status` is what it reported (e.g., "UP").
    Connected { status: String },
    /// Nothing accepted the connection.
    Refused,
    /// No complete answer within the timeout.
    TimedOut,
    /// SonarQube answered with something other than 200.
    UnexpectedStatus(u16),
    /// Anything else, including an unreadable body.
    UnexpectedError(String),
}

impl ProbeOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeOutcome::Connected { .. })
    }
}

/// Checks that SonarQube is up before the agent starts serving.
#[derive(Debug, Clone)]
pub struct SonarQubeProbe {
    client: Client,
    base_url: String,
    timeout: Duration,
    logger: Logger,
}

impl SonarQubeProbe {
    pub fn new(base_url: impl Into<String>, logger: Logger) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: PROBE_TIMEOUT,
            logger,
        }
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), STATUS_PATH)
    }

    /// Probe once and log what happened.
    pub async fn check(&self) -> ProbeOutcome {
        let outcome = match self.fetch_status().await {
            Ok(outcome) => outcome,
            Err(e) => classify(&e),
        };
        self.report(&outcome);
        outcome
    }

    async fn fetch_status(&self) -> Result<ProbeOutcome, reqwest::Error> {
        let response = self
            .client
            .get(self.status_url())
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Ok(ProbeOutcome::UnexpectedStatus(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(match body {
            Value::Object(fields) => ProbeOutcome::Connected {
                status: match fields.get("status") {
                    None => "UNKNOWN".to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                },
            },
            other => ProbeOutcome::UnexpectedError(format!(
                "expected a JSON object from {}, got {}",
                STATUS_PATH, other
            )),
        })
    }

    fn report(&self, outcome: &ProbeOutcome) {
        let url = &self.base_url;
        match outcome {
            ProbeOutcome::Connected { status } => self.logger.info(
                &format!("SonarQube is running - Status: {}", status),
                Some(ORIGIN),
                Some(&json!({ "url": url, "status": status })),
            ),
            ProbeOutcome::UnexpectedStatus(code) => self.logger.error(
                &format!("SonarQube returned unexpected status code: {}", code),
                Some(ORIGIN),
                None,
            ),
            ProbeOutcome::Refused => self.logger.error(
                &format!("Failed to connect to SonarQube at {}", url),
                Some(ORIGIN),
                Some(&json!({ "error": "Connection refused - Is SonarQube running?" })),
            ),
            ProbeOutcome::TimedOut => self.logger.error(
                &format!("Timeout connecting to SonarQube at {}", url),
                Some(ORIGIN),
                None,
            ),
            ProbeOutcome::UnexpectedError(message) => self.logger.error(
                &format!("Unexpected error checking SonarQube: {}", message),
                Some(ORIGIN),
                Some(&json!({ "error": message })),
            ),
        }
    }
}

// A connect timeout reports both `is_timeout` and `is_connect`; it counts as a timeout.
fn classify(error: &reqwest::Error) -> ProbeOutcome {
    if error.is_timeout() {
        ProbeOutcome::TimedOut
    } else if error.is_connect() {
        ProbeOutcome::Refused
    } else {
        ProbeOutcome::UnexpectedError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_url_joins_without_double_slash() {
        let probe = SonarQubeProbe::new("http://sonar.local:9000/", Logger);
        assert_eq!(probe.status_url(), "http://sonar.local:9000/api/system/status");

        let probe = SonarQubeProbe::new("http://sonar.local:9000", Logger);
        assert_eq!(probe.status_url(), "http://sonar.local:9000/api/system/status");
    }

    #[test]
    fn only_connected_counts_as_connected() {
        assert!(ProbeOutcome::Connected { status: "UP".into() }.is_connected());
        assert!(!ProbeOutcome::Refused.is_connected());
        assert!(!ProbeOutcome::TimedOut.is_connected());
        assert!(!ProbeOutcome::UnexpectedStatus(500).is_connected());
        assert!(!ProbeOutcome::UnexpectedError("boom".into()).is_connected());
    }

    #[test]
    fn defaults_to_ten_second_timeout() {
        let probe = SonarQubeProbe::new("http://localhost:9000", Logger);
        assert_eq!(probe.timeout, Duration::from_secs(10));
    }
}
