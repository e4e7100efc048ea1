//! Identity login with auto-provisioning, and access token refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hourbook_auth::identity::{IdentityAssertion, IdentityVerifier};
use hourbook_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use hourbook_core::error::{AppError, ErrorKind};
use hourbook_database::store::UserStore;
use hourbook_entity::user::{CreateUser, User, UserRole, split_display_name};

/// Successful login outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// The logged-in user.
    pub user: User,
    /// Whether the account was created by this login.
    pub provisioned: bool,
    /// Session tokens.
    pub tokens: TokenPair,
}

/// Fresh access token within an existing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResult {
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
}

/// Handles identity login and token refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Identity assertion verifier.
    verifier: Arc<IdentityVerifier>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
    /// Create unknown users as volunteers on first login.
    auto_provision: bool,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        verifier: Arc<IdentityVerifier>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        auto_provision: bool,
    ) -> Self {
        Self {
            users,
            verifier,
            encoder,
            decoder,
            auto_provision,
        }
    }

    /// Logs in the person named by a verified identity assertion.
    pub async fn login(
        &self,
        presented_key: Option<&str>,
        assertion: &IdentityAssertion,
        ip_address: &str,
    ) -> Result<LoginResult, AppError> {
        self.verifier.verify(presented_key, assertion)?;

        let (user, provisioned) = match self.users.find_by_email(&assertion.email).await? {
            Some(user) => (user, false),
            None if self.auto_provision => (self.provision(assertion).await?, true),
            None => {
                warn!(email = %assertion.email, ip = %ip_address, "Login for unknown user");
                return Err(AppError::unauthorized("No account exists for this identity"));
            }
        };

        let user = self
            .users
            .record_login(user.id, assertion.avatar_url.as_deref())
            .await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.email)?;

        info!(
            user_id = %user.id,
            role = %user.role,
            provisioned,
            ip = %ip_address,
            "User logged in"
        );

        Ok(LoginResult {
            user,
            provisioned,
            tokens,
        })
    }

    /// Issues a new access token for the session of a refresh token.
    ///
    /// The role is re-read from the store so role changes take effect.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let (access_token, access_expires_at) = self.encoder.generate_access_token(
            user.id,
            claims.session_id(),
            user.role,
            &user.email,
        )?;

        info!(user_id = %user.id, session_id = %claims.session_id(), "Access token refreshed");

        Ok(RefreshResult {
            access_token,
            access_expires_at,
        })
    }

    async fn provision(&self, assertion: &IdentityAssertion) -> Result<User, AppError> {
        let (first, last) = split_display_name(&assertion.display_name);
        let data = CreateUser::new(&assertion.email, first, last, UserRole::Volunteer)
            .with_avatar(assertion.avatar_url.clone());

        match self.users.create(&data).await {
            Ok(user) => {
                info!(user_id = %user.id, "Provisioned volunteer on first login");
                Ok(user)
            }
            // A concurrent first login created the row.
            Err(e) if e.kind == ErrorKind::Conflict => self
                .users
                .find_by_email(&assertion.email)
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }
}
