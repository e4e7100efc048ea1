//! Verification of identity assertions.
//!
//! The login exchange runs outside this service. It authenticates the
//! person with the external identity provider and then posts the verified
//! email and profile here, presenting the shared identity key.

use serde::{Deserialize, Serialize};
use tracing::warn;

use hourbook_core::config::AuthConfig;
use hourbook_core::error::AppError;

/// Verified profile presented by the login exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityAssertion {
    /// Verified email address.
    pub email: String,
    /// Display name from the identity provider.
    #[serde(default)]
    pub display_name: String,
    /// Profile picture URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Checks the shared key that accompanies an identity assertion.
#[derive(Clone)]
pub struct IdentityVerifier {
    key: Vec<u8>,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier").finish_non_exhaustive()
    }
}

impl IdentityVerifier {
    /// Creates a verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: config.identity_key.as_bytes().to_vec(),
        }
    }

    /// Accepts the assertion if `presented_key` matches the configured key
    /// and the email is plausible.
    pub fn verify(
        &self,
        presented_key: Option<&str>,
        assertion: &IdentityAssertion,
    ) -> Result<(), AppError> {
        let Some(presented) = presented_key else {
            return Err(AppError::unauthorized("Missing identity key"));
        };

        if !constant_time_eq(presented.as_bytes(), &self.key) {
            warn!(email = %assertion.email, "Identity assertion with wrong key");
            return Err(AppError::unauthorized("Invalid identity key"));
        }

        let email = assertion.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Identity assertion carries no valid email"));
        }

        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
