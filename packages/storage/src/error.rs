// ABOUTME: Error types for configuration document loading and persistence
// ABOUTME: Covers filesystem failures, malformed documents, and writer lock contention

use std::path::PathBuf;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config document: {0}")]
    InvalidDocument(String),

    #[error("Config file is locked by another writer: {}", .0.display())]
    Lock(PathBuf),
}
