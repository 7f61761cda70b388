// ABOUTME: Wire and configuration types for the Google OAuth endpoints
// ABOUTME: Endpoint locations, the code exchange form, and provider error bodies

use serde::{Deserialize, Serialize};
use tally_config::constants::{DEFAULT_GOOGLE_AUTH_URL, DEFAULT_GOOGLE_TOKEN_URL};

/// Consent and token endpoint locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    pub auth_url: String,
    pub token_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
            token_url: DEFAULT_GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

/// OAuth authorization code exchange request, sent form-encoded
#[derive(Serialize)]
pub struct TokenExchangeRequest<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'a str, // Always "authorization_code"
}

/// Error body returned by the token endpoint on rejection
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
}
