// ABOUTME: Typed configuration entry for the Google Sheets integration
// ABOUTME: Registration fields, OAuth client settings, and the stored token bundle

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::document::{IntegrationConfig, IntegrationId, IntegrationKind};
use crate::tokens::TokenSet;

/// Out-of-band redirect; the consent page displays the code for the operator to copy
pub const DEFAULT_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// `integrations.google` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleConfig {
    #[serde(default = "google_id")]
    pub id: IntegrationId,
    #[serde(rename = "type", default = "export_kind")]
    pub kind: IntegrationKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub credentials: GoogleCredentials,
    /// Fields written by other tools that this entry must carry through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            id: IntegrationId::Google,
            kind: IntegrationKind::Export,
            name: String::new(),
            document_id: String::new(),
            credentials: GoogleCredentials::default(),
            extra: Map::new(),
        }
    }
}

impl IntegrationConfig for GoogleConfig {
    const ID: IntegrationId = IntegrationId::Google;
}

impl GoogleConfig {
    /// Both client id and secret are present
    pub fn is_registered(&self) -> bool {
        !self.credentials.client_id.is_empty() && !self.credentials.client_secret.is_empty()
    }

    pub fn is_authorized(&self) -> bool {
        self.credentials.tokens.is_some()
    }
}

/// OAuth client registration plus tokens once authorized
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCredentials {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default = "default_scope")]
    pub scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenSet>,
    /// Credential fields written by other tools, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GoogleCredentials {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
            scope: default_scope(),
            tokens: None,
            extra: Map::new(),
        }
    }
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_id", &redact(&self.client_id))
            .field("client_secret", &redact(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("tokens", &self.tokens)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

fn google_id() -> IntegrationId {
    IntegrationId::Google
}

fn export_kind() -> IntegrationKind {
    IntegrationKind::Export
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

fn default_scope() -> Vec<String> {
    vec![SPREADSHEETS_SCOPE.to_string()]
}
