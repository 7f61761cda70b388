// ABOUTME: Failure kinds surfaced by the Google setup flow
// ABOUTME: Maps prompt, storage, and provider errors onto what the operator is told

use tally_auth::AuthError;
use tally_storage::StorageError;
use thiserror::Error;

use crate::setup::prompt::PromptError;

pub type SetupResult<T> = Result<T, SetupError>;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Setup cancelled: {0}")]
    InputAborted(#[from] PromptError),

    #[error("Could not update the configuration file: {0}")]
    Storage(#[from] StorageError),

    #[error("Google rejected the authorization code: {0}")]
    ExchangeRejected(String),

    #[error("Timed out exchanging the authorization code")]
    ExchangeTimeout,

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl From<AuthError> for SetupError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Timeout => SetupError::ExchangeTimeout,
            AuthError::ExchangeRejected(reason)
            | AuthError::Network(reason)
            | AuthError::InvalidResponse(reason) => SetupError::ExchangeRejected(reason),
            AuthError::Configuration(reason) => SetupError::Configuration(reason),
        }
    }
}
