// ABOUTME: Error types for authorization URL construction and code exchange
// ABOUTME: Separates provider rejections and timeouts from transport failures

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token exchange rejected: {0}")]
    ExchangeRejected(String),

    #[error("Token exchange timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout
        } else if err.is_decode() {
            AuthError::InvalidResponse(err.to_string())
        } else {
            AuthError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        AuthError::Configuration(format!("Invalid URL: {}", err))
    }
}
