// ABOUTME: Tally CLI library: runtime configuration, logging, and the setup flows
// ABOUTME: The binaries stay thin wrappers around what is exported here

pub mod config;
pub mod error;
pub mod logging;
pub mod setup;

pub use error::{SetupError, SetupResult};
