//! Wire shapes for failed HTTP responses.
//!
//! Purpose: give every failure a stable JSON body. Classified use-case
//! failures and rejected request payloads share [`ApiErrorResponse`]; missing
//! or invalid bearer tokens use the separate [`UnauthorizedResponse`].

use std::fmt;

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Message returned on every 401 response.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please provide a valid JWT.";

/// Failure body: `{ statusCode, statusPhrase, timestamp, errors }`.
///
/// Built by the response translator; handlers never assemble one by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Numeric HTTP status repeated in the body.
    #[schema(example = 404)]
    pub status_code: u16,
    /// Short phrase describing the status.
    #[schema(example = "Not Found")]
    pub status_phrase: String,
    /// Time the response was produced.
    pub timestamp: DateTime<Utc>,
    /// Human-readable messages.
    #[schema(example = json!(["No task found with id 3fa85f64-5717-4562-b3fc-2c963f66afa6"]))]
    pub errors: Vec<String>,
}

impl ApiErrorResponse {
    /// Assemble a body for `status`.
    pub fn new(
        status: StatusCode,
        phrase: impl Into<String>,
        errors: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            status_code: status.as_u16(),
            status_phrase: phrase.into(),
            timestamp,
            errors,
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.status_code,
            self.status_phrase,
            self.errors.join("; ")
        )
    }
}

impl ResponseError for ApiErrorResponse {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self)
    }
}

/// Body returned when authentication is missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnauthorizedResponse {
    /// Always 401.
    #[schema(example = 401)]
    pub status_code: u16,
    /// Fixed hint asking for a bearer token.
    #[schema(example = "Unauthorized. Please provide a valid JWT.")]
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            status_code: StatusCode::UNAUTHORIZED.as_u16(),
            message: UNAUTHORIZED_MESSAGE.to_owned(),
        }
    }
}

impl fmt::Display for UnauthorizedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ResponseError for UnauthorizedResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")))
            .json(self)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the failure wire shapes.
    use super::*;
    use actix_web::body::to_bytes;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 6, 7, 8, 9)
            .single()
            .expect("valid timestamp")
    }

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("JSON body")
    }

    #[actix_web::test]
    async fn api_error_response_serialises_exact_shape() {
        let error = ApiErrorResponse::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            vec!["missing".to_owned()],
            timestamp(),
        );
        let response = ResponseError::error_response(&error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({
                "statusCode": 404,
                "statusPhrase": "Not Found",
                "timestamp": "2026-05-06T07:08:09Z",
                "errors": ["missing"],
            })
        );
    }

    #[actix_web::test]
    async fn unauthorized_response_uses_separate_schema() {
        let response = ResponseError::error_response(&UnauthorizedResponse::default());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static("Bearer"))
        );

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"statusCode": 401, "message": UNAUTHORIZED_MESSAGE})
        );
    }

    #[test]
    fn unknown_status_codes_fall_back_to_500() {
        let mut error = ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            Vec::new(),
            timestamp(),
        );
        error.status_code = 1000;
        assert_eq!(
            ResponseError::status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
