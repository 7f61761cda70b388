// ABOUTME: Configuration document model shared by every integration
// ABOUTME: Keeps unrelated entries and top-level keys untouched while one entry is merged

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{StorageError, StorageResult};

/// Top-level key holding the integration entries
pub const INTEGRATIONS_KEY: &str = "integrations";

/// Supported external sources, one configuration entry each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationId {
    Plaid,
    Google,
    CsvImport,
    CsvExport,
}

impl IntegrationId {
    /// Key under which the entry is stored in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaid => "plaid",
            Self::Google => "google",
            Self::CsvImport => "csv-import",
            Self::CsvExport => "csv-export",
        }
    }

    /// Get all supported integrations
    pub fn all() -> Vec<Self> {
        vec![Self::Plaid, Self::Google, Self::CsvImport, Self::CsvExport]
    }
}

impl fmt::Display for IntegrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationId {
    type Err = StorageError;

    fn from_str(s: &str) -> StorageResult<Self> {
        match s.to_lowercase().as_str() {
            "plaid" => Ok(Self::Plaid),
            "google" => Ok(Self::Google),
            "csv-import" => Ok(Self::CsvImport),
            "csv-export" => Ok(Self::CsvExport),
            _ => Err(StorageError::InvalidDocument(format!(
                "Unknown integration: {}. Supported: plaid, google, csv-import, csv-export",
                s
            ))),
        }
    }
}

/// Whether an integration feeds data in or writes data out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Import,
    Export,
}

/// Typed view over one entry of the `integrations` mapping
pub trait IntegrationConfig: Serialize + DeserializeOwned + Default {
    const ID: IntegrationId;
}

/// The whole configuration document.
///
/// Only the `integrations` entry being merged is ever decoded into a typed value.
/// Everything else stays as raw JSON so it is written back exactly as it was read,
/// in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document, rejecting anything that is not an object or whose
    /// `integrations` value is not an object.
    pub fn from_slice(bytes: &[u8]) -> StorageResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(root) = value else {
            return Err(StorageError::InvalidDocument(
                "top-level value must be an object".to_string(),
            ));
        };

        match root.get(INTEGRATIONS_KEY) {
            None | Some(Value::Object(_)) => Ok(Self { root }),
            Some(_) => Err(StorageError::InvalidDocument(format!(
                "'{}' must be an object",
                INTEGRATIONS_KEY
            ))),
        }
    }

    /// Serialize as pretty JSON with a trailing newline
    pub fn to_vec_pretty(&self) -> StorageResult<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(&self.root)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Raw top-level value for keys this crate does not model
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Raw entry for an integration, if configured
    pub fn integration(&self, id: IntegrationId) -> Option<&Value> {
        self.integrations().and_then(|entries| entries.get(id.as_str()))
    }

    pub fn has_integration(&self, id: IntegrationId) -> bool {
        self.integration(id).is_some()
    }

    /// Keys of every configured integration, including ones this build does not know
    pub fn integration_keys(&self) -> Vec<&str> {
        self.integrations()
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Decode the entry for `T`, returning `None` when it is absent
    pub fn typed<T: IntegrationConfig>(&self) -> StorageResult<Option<T>> {
        match self.integration(T::ID) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Apply `patch` to the entry for `T` (or its default when absent) and
    /// replace only that entry. Position of an existing entry is preserved.
    pub fn merged<T, F>(mut self, patch: F) -> StorageResult<Self>
    where
        T: IntegrationConfig,
        F: FnOnce(&mut T),
    {
        let mut entry = self.typed::<T>()?.unwrap_or_default();
        patch(&mut entry);
        let value = serde_json::to_value(&entry)?;
        self.set_integration(T::ID, value)?;
        Ok(self)
    }

    fn integrations(&self) -> Option<&Map<String, Value>> {
        self.root.get(INTEGRATIONS_KEY).and_then(Value::as_object)
    }

    fn set_integration(&mut self, id: IntegrationId, value: Value) -> StorageResult<()> {
        let entries = self
            .root
            .entry(INTEGRATIONS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));

        match entries {
            Value::Object(entries) => {
                entries.insert(id.as_str().to_string(), value);
                Ok(())
            }
            _ => Err(StorageError::InvalidDocument(format!(
                "'{}' must be an object",
                INTEGRATIONS_KEY
            ))),
        }
    }
}
