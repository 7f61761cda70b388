use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use tally_auth::GoogleEndpoints;
use tally_config::constants::{
    DEFAULT_GOOGLE_AUTH_URL, DEFAULT_GOOGLE_TOKEN_URL, DEFAULT_HTTP_TIMEOUT_SECS,
    TALLY_GOOGLE_AUTH_URL, TALLY_GOOGLE_TOKEN_URL, TALLY_HTTP_TIMEOUT_SECS,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid HTTP timeout: {0}")]
    InvalidTimeout(#[from] ParseIntError),
    #[error("HTTP timeout must be at least 1 second, got {0}")]
    TimeoutOutOfRange(u64),
    #[error("Could not determine where the config file lives; set TALLY_CONFIG_FILE")]
    NoConfigPath,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub config_file: PathBuf,
    pub http_timeout: Duration,
    pub google: GoogleEndpoints,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config_file = tally_config::config_file_path().ok_or(ConfigError::NoConfigPath)?;

        let timeout_secs = match env::var(TALLY_HTTP_TIMEOUT_SECS) {
            Ok(value) => value.trim().parse::<u64>()?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            return Err(ConfigError::TimeoutOutOfRange(timeout_secs));
        }

        let google = GoogleEndpoints {
            auth_url: env::var(TALLY_GOOGLE_AUTH_URL)
                .unwrap_or_else(|_| DEFAULT_GOOGLE_AUTH_URL.to_string()),
            token_url: env::var(TALLY_GOOGLE_TOKEN_URL)
                .unwrap_or_else(|_| DEFAULT_GOOGLE_TOKEN_URL.to_string()),
        };

        Ok(Config {
            config_file,
            http_timeout: Duration::from_secs(timeout_secs),
            google,
        })
    }
}
