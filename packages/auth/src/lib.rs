// ABOUTME: Tally authentication library providing the Google OAuth capability
// ABOUTME: Builds consent URLs and exchanges authorization codes for token bundles

pub mod error;
pub mod oauth;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use oauth::{AuthorizationProvider, GoogleEndpoints, GoogleOAuthProvider};
pub use tally_storage::TokenSet;
