// ABOUTME: Environment variable name constants and built-in defaults
// ABOUTME: Centralized definitions of every environment variable Tally reads

// Configuration Document
pub const TALLY_CONFIG_FILE: &str = "TALLY_CONFIG_FILE";

// HTTP Client Configuration
pub const TALLY_HTTP_TIMEOUT_SECS: &str = "TALLY_HTTP_TIMEOUT_SECS";

// Google OAuth Endpoints
pub const TALLY_GOOGLE_AUTH_URL: &str = "TALLY_GOOGLE_AUTH_URL";
pub const TALLY_GOOGLE_TOKEN_URL: &str = "TALLY_GOOGLE_TOKEN_URL";

// System Environment Variables
pub const HOME: &str = "HOME";
pub const USERPROFILE: &str = "USERPROFILE"; // Windows

// Defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

pub const CONFIG_DIR_NAME: &str = ".tally";
pub const CONFIG_FILE_NAME: &str = "config.json";
