//! Account HTTP handlers.
//!
//! ```text
//! POST   /api/v1/accounts/register {"username":"alice","password":"hunter22"}
//! POST   /api/v1/accounts/login    {"username":"alice","password":"hunter22"}
//! DELETE /api/v1/accounts/{id}
//! ```
//!
//! Registration and login are anonymous. Self-registered accounts always get
//! the `user` role.

use actix_web::{HttpResponse, delete, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{LoginPayload, RegisterAccountRequest, RemoveAccountRequest};
use crate::domain::{AccountPayload, Credentials, UserId, UserRole};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::cancellation::RequestCancellation;
use crate::inbound::http::error::{ApiErrorResponse, UnauthorizedResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Username and password submitted to register or log in.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsBody {
    /// Login name; letters, digits, `.`, `-` and `_`.
    #[schema(example = "alice")]
    pub username: String,
    /// Plain-text password, hashed before storage.
    #[schema(example = "hunter22")]
    pub password: String,
}

impl TryFrom<CredentialsBody> for Credentials {
    type Error = crate::domain::CredentialsValidationError;

    fn try_from(value: CredentialsBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    #[schema(example = "user")]
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<AccountPayload> for AccountResponse {
    fn from(value: AccountPayload) -> Self {
        Self {
            id: *value.id.as_uuid(),
            username: value.username,
            role: value.role.to_string(),
            created_at: value.created_at,
        }
    }
}

/// Bearer token issued on login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<LoginPayload> for LoginResponse {
    fn from(value: LoginPayload) -> Self {
        Self {
            token: value.token,
            expires_at: value.expires_at,
        }
    }
}

/// Register a new account with the `user` role.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/register",
    request_body = CredentialsBody,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Username taken or password rejected", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse)
    ),
    tags = ["accounts"],
    operation_id = "registerAccount",
    security([])
)]
#[post("/accounts/register")]
pub async fn register(
    state: web::Data<HttpState>,
    cancel: RequestCancellation,
    payload: web::Json<CredentialsBody>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = RegisterAccountRequest {
        credentials,
        role: UserRole::User,
    };
    let outcome = state.accounts.register(request, cancel.token()).await;
    let account = state.translator.resolve(outcome)?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/login",
    request_body = CredentialsBody,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Incorrect password", body = ApiErrorResponse),
        (status = 404, description = "Unknown username", body = ApiErrorResponse)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/accounts/login")]
pub async fn login(
    state: web::Data<HttpState>,
    cancel: RequestCancellation,
    payload: web::Json<CredentialsBody>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = Credentials::try_from(payload.into_inner())
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let outcome = state.login.login(credentials, cancel.token()).await;
    let issued = state.translator.resolve(outcome)?;
    Ok(web::Json(LoginResponse::from(issued)))
}

/// Remove an account. Callers may only remove their own unless they are
/// administrators.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses(
        (status = 204, description = "Account removed"),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Account belongs to someone else", body = ApiErrorResponse),
        (status = 404, description = "Account not found", body = ApiErrorResponse)
    ),
    tags = ["accounts"],
    operation_id = "removeAccount"
)]
#[delete("/accounts/{id}")]
pub async fn remove_account(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let account_id: UserId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = RemoveAccountRequest {
        caller: caller.identity(),
        account_id,
    };
    let outcome = state.accounts.remove(request, cancel.token()).await;
    state.translator.resolve(outcome)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Account route tests over mocked ports.
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{Error, OperationResult};
    use crate::inbound::http::test_utils::{MockPorts, bearer, fixed_now, test_app, test_caller};

    fn anonymous_ports() -> MockPorts {
        MockPorts::for_caller(test_caller(UserRole::User))
    }

    #[actix_web::test]
    async fn register_forces_user_role() {
        let mut ports = anonymous_ports();
        ports
            .accounts
            .expect_register()
            .withf(|request, _| {
                request.role == UserRole::User && request.credentials.username().as_str() == "alice"
            })
            .times(1)
            .returning(|request, _| {
                OperationResult::success(AccountPayload {
                    id: UserId::random(),
                    username: request.credentials.username().to_string(),
                    role: request.role,
                    created_at: fixed_now(),
                })
            });
        let (state, _log) = ports.into_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/accounts/register")
            .set_json(json!({ "username": "alice", "password": "hunter22" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["username"], json!("alice"));
        assert_eq!(body["role"], json!("user"));
    }

    #[rstest]
    #[case(Error::identity_user_already_exists("Provided username already exists"))]
    #[case(Error::identity_creation_failed("Password must be at least 8 characters long"))]
    #[actix_web::test]
    async fn register_failures_are_bad_requests(#[case] failure: Error) {
        let message = failure.message().to_owned();
        let mut ports = anonymous_ports();
        ports
            .accounts
            .expect_register()
            .returning(move |_, _| OperationResult::failure(failure.clone()));
        let (state, log) = ports.into_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/accounts/register")
            .set_json(json!({ "username": "alice", "password": "short" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["errors"], json!([message]));
        assert!(log.entries().is_empty());
    }

    #[actix_web::test]
    async fn login_returns_token() {
        let mut ports = anonymous_ports();
        ports.login.expect_login().times(1).returning(|_, _| {
            OperationResult::success(LoginPayload {
                token: "signed".to_owned(),
                expires_at: fixed_now(),
                user_id: UserId::random(),
                role: UserRole::User,
            })
        });
        let (state, _log) = ports.into_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/accounts/login")
            .set_json(json!({ "username": "alice", "password": "hunter22" }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body,
            json!({ "token": "signed", "expiresAt": "2026-10-19T12:00:00Z" })
        );
    }

    #[actix_web::test]
    async fn login_with_unknown_user_is_not_found() {
        let mut ports = anonymous_ports();
        ports.login.expect_login().returning(|_, _| {
            OperationResult::failure(Error::identity_user_not_found(
                "Unable to find a user with the specified username",
            ))
        });
        let (state, _log) = ports.into_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/accounts/login")
            .set_json(json!({ "username": "ghost", "password": "hunter22" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn removing_foreign_account_is_forbidden() {
        let mut ports = anonymous_ports();
        ports.accounts.expect_remove().returning(|_, _| {
            OperationResult::failure(Error::unauthorized_account_removal(
                "Cannot remove an account you do not own",
            ))
        });
        let (state, _log) = ports.into_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/accounts/{}", UserId::random()))
            .insert_header(bearer())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["statusPhrase"], json!("Unauthenticated"));
    }

    #[actix_web::test]
    async fn removing_account_requires_token() {
        let mut ports = anonymous_ports();
        ports.accounts.expect_remove().never();
        let (state, _log) = ports.into_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/accounts/{}", UserId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
