//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token and identity assertion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Value of the `iss` claim on issued tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Shared key the identity exchange server presents when asserting a login.
    #[serde(default = "default_identity_key")]
    pub identity_key: String,
    /// Create a volunteer account on first login of an unknown email.
    #[serde(default = "default_auto_provision")]
    pub auto_provision: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            identity_key: default_identity_key(),
            auto_provision: default_auto_provision(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "hourbook".to_string()
}

fn default_access_ttl() -> u64 {
    600
}

fn default_refresh_ttl() -> u64 {
    72
}

fn default_identity_key() -> String {
    "CHANGE_ME_IDENTITY_KEY".to_string()
}

fn default_auto_provision() -> bool {
    true
}
