//! Identity assertions from the trusted login exchange.

pub mod verifier;

pub use verifier::{IdentityAssertion, IdentityVerifier};
