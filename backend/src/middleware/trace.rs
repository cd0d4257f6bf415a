//! Per-request trace identifiers.
//!
//! [`trace_requests`] gives every request a fresh [`TraceId`], runs the rest
//! of the pipeline inside an `http.request` span with that id in task-local
//! scope, and returns it to the client in the `Trace-Id` header. The
//! translator's fallback log reads the same id through [`TraceId::current`],
//! so a 500 reported by a client can be matched to its server-side record.
//!
//! Task-locals do not follow `tokio::spawn` or `spawn_blocking`; wrap moved
//! work in [`TraceId::scope`] when the id must travel with it.

use std::fmt;
use std::future::Future;

use actix_web::Error;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use tokio::task_local;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

/// Response header carrying the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Identifier correlating one request's response with its log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being served on this task, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Middleware function assigning a [`TraceId`] to each request.
///
/// ```
/// use actix_web::App;
/// use actix_web::middleware::from_fn;
/// use taskboard::middleware::trace_requests;
///
/// let _app = App::new().wrap(from_fn(trace_requests));
/// ```
///
/// # Errors
/// Passes through errors raised by the wrapped service.
pub async fn trace_requests(
    request: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let trace_id = TraceId::fresh();
    let span = info_span!(
        "http.request",
        method = %request.method(),
        path = %request.path(),
        trace_id = %trace_id,
    );
    let handled = async move {
        let response = next.call(request).await?;
        debug!(status = response.status().as_u16(), "request completed");
        Ok::<_, Error>(response)
    };
    let mut response = TraceId::scope(trace_id, handled.instrument(span)).await?;

    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            response
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(err) => warn!(%err, %trace_id, "trace id is not a valid header value"),
    }
    Ok(response)
}
