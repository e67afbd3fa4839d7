//! Configuration validation.
//!
//! # Responsibilities
//! - Check the SonarQube URL is absolute and uses http or https
//! - Check the listener host is non-empty
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("SONARQUBE_URL `{url}` is not a valid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("SONARQUBE_URL `{url}` must use http or https, got `{scheme}`")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("HOST must not be empty")]
    EmptyHost,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.sonarqube_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UnsupportedScheme {
                url: config.sonarqube_url.clone(),
                scheme: url.scheme().to_string(),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUrl {
            url: config.sonarqube_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
