//! Shared validation helpers for inbound HTTP adapters.
//!
//! Payload problems are reported as a [`RequestRejection`] naming the field;
//! handlers turn it into a 400 body through the response translator.

use std::fmt;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use chrono::Utc;
use tracing::debug;

use crate::domain::{PageRequest, TaskPriority};

use super::error::ApiErrorResponse;
use super::state::HttpState;
use super::translator::BAD_REQUEST_PHRASE;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

/// A request field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRejection {
    field: &'static str,
    message: String,
}

impl RequestRejection {
    pub(crate) fn new(field: FieldName, message: impl fmt::Display) -> Self {
        Self {
            field: field.0,
            message: message.to_string(),
        }
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field
    }
}

impl fmt::Display for RequestRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Parse an identifier, attributing failures to `field`.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, RequestRejection>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|err| RequestRejection::new(field, err))
}

/// Parse an optional priority, defaulting to medium.
pub(crate) fn parse_priority(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<TaskPriority>, RequestRejection> {
    value
        .map(|raw| raw.parse::<TaskPriority>())
        .transpose()
        .map_err(|err| RequestRejection::new(field, err))
}

/// Validate paging query values.
pub(crate) fn parse_page(
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<PageRequest, RequestRejection> {
    PageRequest::new(page, page_size)
        .map_err(|err| RequestRejection::new(FieldName::new("page"), err))
}

fn reject(req: &HttpRequest, message: String) -> actix_web::Error {
    debug!(%message, path = %req.path(), "request payload rejected");
    let response = match req.app_data::<web::Data<HttpState>>() {
        Some(state) => state.translator.bad_request(message),
        None => ApiErrorResponse::new(
            actix_web::http::StatusCode::BAD_REQUEST,
            BAD_REQUEST_PHRASE,
            vec![message],
            Utc::now(),
        ),
    };
    response.into()
}

/// JSON extractor error handler producing the uniform 400 body.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    reject(req, format!("Invalid JSON body: {err}"))
}

/// Query-string extractor error handler producing the uniform 400 body.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    reject(req, format!("Invalid query string: {err}"))
}

/// Path extractor error handler producing the uniform 400 body.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    reject(req, format!("Invalid path parameter: {err}"))
}

/// Extractor configuration routing payload errors through the handlers above.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}
