//! Configuration loading from the process environment.

use std::ffi::OsString;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("invalid arguments: {0}")]
    Args(#[from] clap::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `.env` into the process environment if the file exists.
///
/// Variables already set in the environment are left untouched.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Hydrate `.env`, then parse and validate configuration from `args`.
pub fn load_config<I, T>(args: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    load_dotenv()?;
    let config = AppConfig::try_parse_from(args)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
