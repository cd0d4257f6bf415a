//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers that take an [`AuthenticatedCaller`] argument only run once the
//! `Authorization: Bearer <jwt>` header has been verified; otherwise actix
//! answers with the 401 [`UnauthorizedResponse`].

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::CallerIdentity;

use super::error::UnauthorizedResponse;
use super::state::HttpState;

/// Identity of the caller, resolved from the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller(pub CallerIdentity);

impl AuthenticatedCaller {
    /// Unwrap the resolved identity.
    #[must_use]
    pub const fn identity(&self) -> CallerIdentity {
        self.0
    }
}

/// Extract the token from an `Authorization: Bearer` header value.
pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedCaller, actix_web::Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HTTP state missing; cannot verify bearer tokens");
        return Err(actix_web::error::ErrorInternalServerError(
            "authentication unavailable",
        ));
    };

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(UnauthorizedResponse::default)?;

    state
        .tokens
        .verify(token)
        .map(AuthenticatedCaller)
        .map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            UnauthorizedResponse::default().into()
        })
}

impl FromRequest for AuthenticatedCaller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
