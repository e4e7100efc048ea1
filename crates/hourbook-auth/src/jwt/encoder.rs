//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use hourbook_core::config::AuthConfig;
use hourbook_core::error::AppError;
use hourbook_core::types::UserId;
use hourbook_entity::user::UserRole;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer claim.
    issuer: String,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
        }
    }

    /// Generates a new access + refresh token pair for a fresh login session.
    pub fn generate_token_pair(
        &self,
        user_id: UserId,
        role: UserRole,
        email: &str,
    ) -> Result<TokenPair, AppError> {
        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let refresh_exp = now + chrono::Duration::hours(self.refresh_ttl_hours);

        let (access_token, access_exp) =
            self.generate_access_token(user_id, session_id, role, email)?;

        let refresh_claims = self.claims(
            user_id,
            session_id,
            role,
            email,
            now,
            refresh_exp,
            TokenType::Refresh,
        );
        let refresh_token = encode(&Header::default(), &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }

    /// Generates a standalone access token within an existing session.
    pub fn generate_access_token(
        &self,
        user_id: UserId,
        session_id: Uuid,
        role: UserRole,
        email: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let claims = self.claims(user_id, session_id, role, email, now, exp, TokenType::Access);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }

    #[allow(clippy::too_many_arguments)]
    fn claims(
        &self,
        user_id: UserId,
        session_id: Uuid,
        role: UserRole,
        email: &str,
        issued: DateTime<Utc>,
        expires: DateTime<Utc>,
        token_type: TokenType,
    ) -> Claims {
        Claims {
            sub: user_id,
            sid: session_id,
            role,
            email: email.to_string(),
            iss: self.issuer.clone(),
            iat: issued.timestamp(),
            exp: expires.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        }
    }
}
