//! Response translator: the only place an [`ErrorKind`] becomes an HTTP
//! status.
//!
//! The translator walks [`CLASSIFICATIONS`] in priority order and answers
//! with the first rule whose kind appears anywhere in the error list. Only
//! that rule's first matching message reaches the client. Failures no rule
//! recognises become a generic 500 whose body never echoes internal detail;
//! those, and only those, are reported through the injected
//! [`FallbackLog`].

use std::sync::Arc;

use actix_web::http::StatusCode;
use mockable::Clock;
use tracing::error;

use crate::domain::{Error, ErrorKind, ErrorList, OperationResult};
use crate::middleware::trace::TraceId;

use super::error::ApiErrorResponse;

/// Phrase used for the unclassified fallback.
pub const FALLBACK_PHRASE: &str = "Server Error";
/// Fixed message sent to clients for unclassified failures.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";
/// Phrase used when the request itself is malformed.
pub const BAD_REQUEST_PHRASE: &str = "Bad Request";

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Error kind this row matches.
    pub kind: ErrorKind,
    /// HTTP status sent for the kind.
    pub status: StatusCode,
    /// `statusPhrase` written to the body.
    pub phrase: &'static str,
}

/// Ordered classification rules; earlier rows win.
pub const CLASSIFICATIONS: &[Classification] = &[
    Classification {
        kind: ErrorKind::NotFound,
        status: StatusCode::NOT_FOUND,
        phrase: "Not Found",
    },
    Classification {
        kind: ErrorKind::IdentityUserAlreadyExists,
        status: StatusCode::BAD_REQUEST,
        phrase: "Bad Request",
    },
    Classification {
        kind: ErrorKind::IdentityCreationFailed,
        status: StatusCode::BAD_REQUEST,
        phrase: "Bad Request",
    },
    Classification {
        kind: ErrorKind::IncorrectPassword,
        status: StatusCode::BAD_REQUEST,
        phrase: "Bad Request",
    },
    Classification {
        kind: ErrorKind::IdentityUserNotFound,
        status: StatusCode::NOT_FOUND,
        phrase: "Not Found",
    },
    Classification {
        kind: ErrorKind::UnauthorizedAccountRemoval,
        status: StatusCode::FORBIDDEN,
        phrase: "Unauthenticated",
    },
    Classification {
        kind: ErrorKind::UserNotAllowed,
        status: StatusCode::FORBIDDEN,
        phrase: "Forbidden Request",
    },
];

/// Sink for failures that no classification rule recognised.
pub trait FallbackLog: Send + Sync {
    /// Record the response sent to the client and the errors behind it.
    fn record_unclassified(&self, response: &ApiErrorResponse, errors: &ErrorList);
}

/// [`FallbackLog`] writing through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFallbackLog;

impl FallbackLog for TracingFallbackLog {
    fn record_unclassified(&self, response: &ApiErrorResponse, errors: &ErrorList) {
        let serialized = serde_json::to_string(response)
            .unwrap_or_else(|err| format!("<unserialisable response: {err}>"));
        let causes: Vec<&str> = errors.iter().map(Error::message).collect();
        let kinds: Vec<&str> = errors.iter().map(|err| err.kind().as_str()).collect();
        let trace_id = TraceId::current().map(|id| id.to_string());
        error!(
            response = %serialized,
            ?causes,
            ?kinds,
            trace_id = trace_id.as_deref().unwrap_or("-"),
            "unclassified operation failure"
        );
    }
}

/// Converts operation outcomes into HTTP failure bodies.
#[derive(Clone)]
pub struct ResponseTranslator {
    clock: Arc<dyn Clock>,
    log: Arc<dyn FallbackLog>,
}

impl ResponseTranslator {
    /// Build a translator with explicit clock and fallback log.
    pub fn new(clock: Arc<dyn Clock>, log: Arc<dyn FallbackLog>) -> Self {
        Self { clock, log }
    }

    /// Build a translator that reports fallbacks through `tracing`.
    pub fn with_tracing(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Arc::new(TracingFallbackLog))
    }

    /// Map a non-empty error list onto exactly one response body.
    pub fn translate(&self, errors: &ErrorList) -> ApiErrorResponse {
        let timestamp = self.clock.utc();
        let matched = CLASSIFICATIONS.iter().find_map(|rule| {
            errors
                .first_of_kind(rule.kind)
                .map(|error| (rule, error.message()))
        });

        if let Some((rule, message)) = matched {
            return ApiErrorResponse::new(
                rule.status,
                rule.phrase,
                vec![message.to_owned()],
                timestamp,
            );
        }

        let response = ApiErrorResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            FALLBACK_PHRASE,
            vec![UNKNOWN_ERROR_MESSAGE.to_owned()],
            timestamp,
        );
        self.log.record_unclassified(&response, errors);
        response
    }

    /// Unwrap a successful payload or translate the failure.
    ///
    /// # Errors
    /// Returns the translated [`ApiErrorResponse`] when the outcome failed.
    pub fn resolve<T>(&self, outcome: OperationResult<T>) -> Result<T, ApiErrorResponse> {
        outcome
            .into_result()
            .map_err(|errors| self.translate(&errors))
    }

    /// 400 body for a request the adapter could not parse.
    pub fn bad_request(&self, message: impl Into<String>) -> ApiErrorResponse {
        ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            BAD_REQUEST_PHRASE,
            vec![message.into()],
            self.clock.utc(),
        )
    }
}
