// ABOUTME: Shared configuration constants and path resolution for Tally
// ABOUTME: Resolves where the integration configuration document lives on disk

pub mod constants;

use std::env;
use std::path::PathBuf;

use tracing::debug;

/// Resolve the configuration document path.
///
/// `TALLY_CONFIG_FILE` wins when set and non-empty; otherwise the document lives at
/// `~/.tally/config.json`. Returns `None` only when no home directory can be found.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(constants::TALLY_CONFIG_FILE) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            debug!("Using config file from {}", constants::TALLY_CONFIG_FILE);
            return Some(PathBuf::from(trimmed));
        }
    }

    home_dir().map(|home| {
        home.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}

fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().or_else(|| {
        env::var(constants::HOME)
            .or_else(|_| env::var(constants::USERPROFILE))
            .ok()
            .map(PathBuf::from)
    })
}
