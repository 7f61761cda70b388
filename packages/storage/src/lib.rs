// ABOUTME: Tally storage library for the shared integration configuration document
// ABOUTME: Typed integration entries, isolated merges, and atomic on-disk persistence

pub mod document;
pub mod error;
pub mod google;
pub mod store;
pub mod tokens;

// Re-export main types
pub use document::{ConfigDocument, IntegrationConfig, IntegrationId, IntegrationKind};
pub use error::{StorageError, StorageResult};
pub use google::{GoogleConfig, GoogleCredentials};
pub use store::ConfigStore;
pub use tokens::TokenSet;
