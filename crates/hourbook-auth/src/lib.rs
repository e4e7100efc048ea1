//! # hourbook-auth
//!
//! Authentication and authorization primitives for Hourbook.
//!
//! ## Modules
//!
//! - `jwt` - session token creation and validation
//! - `identity` - verification of identity assertions from the login exchange
//! - `rbac` - role guards for endpoint and workflow checks

pub mod identity;
pub mod jwt;
pub mod rbac;

pub use identity::IdentityVerifier;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use rbac::RoleGuard;
