//! Ports for issuing and verifying bearer access tokens.
//!
//! Issuance is driven by the login use-case; verification is used by the
//! inbound HTTP adapter to resolve a [`CallerIdentity`] for every
//! authenticated request.

use chrono::{DateTime, Utc};

use crate::domain::CallerIdentity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum AccessTokenError {
        /// The token could not be signed.
        Signing { message: String } => "failed to sign access token: {message}",
        /// The token is malformed, expired, or carries a bad signature.
        Invalid { message: String } => "invalid access token: {message}",
    }
}

/// Signed token handed to a client after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded bearer token.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Issues access tokens for an authenticated identity.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenIssuer: Send + Sync {
    /// Sign a token carrying `identity`.
    fn issue(&self, identity: &CallerIdentity) -> Result<IssuedToken, AccessTokenError>;
}

/// Resolves the identity carried by an access token.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenVerifier: Send + Sync {
    /// Validate `token` and return the identity it carries.
    fn verify(&self, token: &str) -> Result<CallerIdentity, AccessTokenError>;
}
