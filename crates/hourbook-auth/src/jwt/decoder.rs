//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use hourbook_core::config::AuthConfig;
use hourbook_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew
        validation.set_issuer(&[config.issuer.as_str()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthorized(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::unauthorized("Invalid token issuer")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use hourbook_core::error::ErrorKind;
    use hourbook_core::types::UserId;
    use hourbook_entity::user::UserRole;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-test-secret-that-is-long-enough".into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_token_pair_round_trip() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let user = UserId::new();

        let pair = encoder
            .generate_token_pair(user, UserRole::Supervisor, "sup@x.org")
            .unwrap();
        let access = decoder.decode_access_token(&pair.access_token).unwrap();
        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();

        assert_eq!(access.sub, user);
        assert_eq!(access.role, UserRole::Supervisor);
        assert_eq!(access.sid, refresh.sid);
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let cfg = config();
        let pair = JwtEncoder::new(&cfg)
            .generate_token_pair(UserId::new(), UserRole::Volunteer, "v@x.org")
            .unwrap();

        let err = JwtDecoder::new(&cfg)
            .decode_access_token(&pair.refresh_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let pair = JwtEncoder::new(&config())
            .generate_token_pair(UserId::new(), UserRole::Admin, "a@x.org")
            .unwrap();

        let other = AuthConfig {
            jwt_secret: "a-completely-different-secret".into(),
            ..AuthConfig::default()
        };
        assert!(JwtDecoder::new(&other)
            .decode_access_token(&pair.access_token)
            .is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config())
            .decode_access_token("not.a.token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
