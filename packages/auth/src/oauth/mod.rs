// ABOUTME: OAuth module providing the Google authorization capability
// ABOUTME: Includes the provider seam, the Google implementation, and wire types

pub mod provider;
pub mod types;

pub use provider::{AuthorizationProvider, GoogleOAuthProvider};
pub use types::GoogleEndpoints;
