// ABOUTME: Google OAuth provider: consent URL construction and authorization code exchange
// ABOUTME: Exposes the capability behind a trait so the setup flow can be driven by fakes

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

use tally_storage::{GoogleCredentials, TokenSet};

use crate::{
    error::{AuthError, AuthResult},
    oauth::types::{GoogleEndpoints, TokenErrorResponse, TokenExchangeRequest},
};

/// Field Google client libraries persist alongside the tokens (epoch milliseconds)
pub const EXPIRY_DATE_FIELD: &str = "expiry_date";

/// Authorization capability consumed by the setup flow
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Consent page URL for the registered client
    fn authorization_url(&self, credentials: &GoogleCredentials) -> AuthResult<Url>;

    /// Exchange a single-use authorization code for tokens
    async fn exchange_code(
        &self,
        credentials: &GoogleCredentials,
        code: &str,
    ) -> AuthResult<TokenSet>;
}

/// Talks to Google's OAuth 2.0 endpoints
pub struct GoogleOAuthProvider {
    endpoints: GoogleEndpoints,
    client: Client,
}

impl GoogleOAuthProvider {
    /// Create a provider whose exchange requests give up after `timeout`
    pub fn new(endpoints: GoogleEndpoints, timeout: Duration) -> AuthResult<Self> {
        Url::parse(&endpoints.auth_url)?;
        Url::parse(&endpoints.token_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoints, client })
    }
}

#[async_trait]
impl AuthorizationProvider for GoogleOAuthProvider {
    fn authorization_url(&self, credentials: &GoogleCredentials) -> AuthResult<Url> {
        if credentials.client_id.is_empty() {
            return Err(AuthError::Configuration(
                "Client ID must be set before authorizing".to_string(),
            ));
        }

        let mut url = Url::parse(&self.endpoints.auth_url)?;
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("scope", &credentials.scope.join(" "))
            .append_pair("response_type", "code")
            .append_pair("client_id", &credentials.client_id)
            .append_pair("redirect_uri", &credentials.redirect_uri);

        debug!("Built authorization URL for {}", self.endpoints.auth_url);
        Ok(url)
    }

    async fn exchange_code(
        &self,
        credentials: &GoogleCredentials,
        code: &str,
    ) -> AuthResult<TokenSet> {
        info!("Exchanging authorization code for tokens");

        let request = TokenExchangeRequest {
            code,
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            redirect_uri: &credentials.redirect_uri,
            grant_type: "authorization_code",
        };

        let response = self
            .client
            .post(&self.endpoints.token_url)
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Only the error code is surfaced; descriptions may echo request data
            let reason = response
                .json::<TokenErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "unknown_error".to_string());
            error!("Token exchange failed with status {} ({})", status, reason);
            return Err(AuthError::ExchangeRejected(format!(
                "provider returned {} ({})",
                status, reason
            )));
        }

        let fields: Map<String, Value> = response.json().await?;
        if !fields.contains_key("access_token") {
            return Err(AuthError::InvalidResponse(
                "response did not include an access token".to_string(),
            ));
        }

        let mut tokens = TokenSet::new(fields);
        stamp_expiry(&mut tokens);

        info!("Received tokens from provider");
        Ok(tokens)
    }
}

/// Record an absolute expiry next to the relative `expires_in`
fn stamp_expiry(tokens: &mut TokenSet) {
    let expires_in = tokens.get("expires_in").and_then(Value::as_i64);
    let Some(seconds) = expires_in else {
        return;
    };

    let now = Utc::now().timestamp_millis();
    match seconds
        .checked_mul(1000)
        .and_then(|ms| now.checked_add(ms))
    {
        Some(expiry_ms) => tokens.insert(EXPIRY_DATE_FIELD, Value::from(expiry_ms)),
        None => warn!("Ignoring out-of-range expires_in ({}s) from provider", seconds),
    }
}
