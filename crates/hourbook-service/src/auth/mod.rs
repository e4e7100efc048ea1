//! Login and session token refresh.

pub mod service;

pub use service::{AuthService, LoginResult, RefreshResult};
