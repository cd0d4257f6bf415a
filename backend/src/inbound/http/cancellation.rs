//! Request-scoped cancellation.
//!
//! Each request gets a child of the server's shutdown token. The child is
//! also cancelled when the extractor is dropped, which happens when actix
//! abandons the handler future after a client disconnect.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tokio_util::sync::{CancellationToken, DropGuard};

use super::state::HttpState;

/// Cancellation signal handed to use-case handlers.
pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    fn child_of(parent: &CancellationToken) -> Self {
        let token = parent.child_token();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    /// Token to pass into a handler.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl FromRequest for RequestCancellation {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let scope = match req.app_data::<web::Data<HttpState>>() {
            Some(state) => Self::child_of(&state.shutdown),
            None => Self::child_of(&CancellationToken::new()),
        };
        ready(Ok(scope))
    }
}
