// ABOUTME: Opaque token bundle returned by an OAuth token exchange
// ABOUTME: Stored verbatim in the config document and redacted from debug output

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Token fields exactly as the provider returned them.
///
/// Never interpreted here; the field names belong to the provider.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(Map<String, Value>);

impl TokenSet {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for TokenSet {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("fields", &self.fields().collect::<Vec<_>>())
            .finish()
    }
}
