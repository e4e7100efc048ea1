//! Session token payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hourbook_core::types::UserId;
use hourbook_entity::user::UserRole;

/// Claims carried by both halves of a token pair.
///
/// `role` is a snapshot taken when the pair was issued; a refresh re-reads
/// it from the user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    /// Login session; the access and refresh token of a pair share it.
    pub sid: Uuid,
    pub role: UserRole,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
    pub token_type: TokenType,
}

/// Which half of a pair a token is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        self.sub
    }

    pub fn session_id(&self) -> Uuid {
        self.sid
    }
}
