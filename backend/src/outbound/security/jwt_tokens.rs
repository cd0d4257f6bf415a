//! HS256 JSON Web Tokens implementing both access-token ports.
//!
//! Claims carry the account id (`sub`), role, issuer and the issue and expiry
//! instants in Unix seconds. Expiry is checked by `jsonwebtoken` against the
//! system clock.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{AccessTokenError, AccessTokenIssuer, AccessTokenVerifier, IssuedToken};
use crate::domain::{CallerIdentity, UserId, UserRole};

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service. `secret` should be at least [`MIN_SECRET_LENGTH`]
    /// bytes; configuration validation enforces that before wiring.
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
            clock,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl AccessTokenIssuer for JwtTokenService {
    fn issue(&self, identity: &CallerIdentity) -> Result<IssuedToken, AccessTokenError> {
        let issued_at = self.clock.utc();
        let expires_at: DateTime<Utc> = issued_at + self.ttl;
        let claims = Claims {
            sub: identity.user_id().to_string(),
            role: identity.role().as_str().to_owned(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| AccessTokenError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }
}

impl AccessTokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<CallerIdentity, AccessTokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation()).map_err(|err| {
            debug!(error = %err, "token rejected");
            AccessTokenError::invalid(err.to_string())
        })?;
        let user_id = UserId::new(&data.claims.sub)
            .map_err(|err| AccessTokenError::invalid(err.to_string()))?;
        let role = data
            .claims
            .role
            .parse::<UserRole>()
            .map_err(|err| AccessTokenError::invalid(err.to_string()))?;
        Ok(CallerIdentity::new(user_id, role))
    }
}
