//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::{
    MockAccessTokenVerifier, MockAccountCommand, MockCategoryCommand, MockCategoryQuery,
    MockLoginService, MockTaskCommand, MockTaskQuery,
};
use crate::domain::{CallerIdentity, ErrorList, UserId, UserRole};

use super::error::ApiErrorResponse;
use super::state::{HttpState, HttpStatePorts};
use super::translator::{FallbackLog, ResponseTranslator};

/// Bearer token accepted by [`verifier_for`].
pub const TEST_TOKEN: &str = "test-token";

/// Clock frozen at [`fixed_now`].
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        fixed_now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Instant reported by [`FixedClock`].
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Fallback log that keeps every recorded response.
#[derive(Default)]
pub struct RecordingFallbackLog {
    entries: Mutex<Vec<ApiErrorResponse>>,
}

impl RecordingFallbackLog {
    /// Responses recorded so far.
    pub fn entries(&self) -> Vec<ApiErrorResponse> {
        self.entries
            .lock()
            .expect("recording log mutex poisoned")
            .clone()
    }
}

impl FallbackLog for RecordingFallbackLog {
    fn record_unclassified(&self, response: &ApiErrorResponse, _errors: &ErrorList) {
        self.entries
            .lock()
            .expect("recording log mutex poisoned")
            .push(response.clone());
    }
}

/// Translator over [`FixedClock`] plus the log it reports to.
pub fn recording_translator() -> (ResponseTranslator, Arc<RecordingFallbackLog>) {
    let log = Arc::new(RecordingFallbackLog::default());
    let translator = ResponseTranslator::new(Arc::new(FixedClock), log.clone());
    (translator, log)
}

/// Token verifier accepting only [`TEST_TOKEN`] for `identity`.
pub fn verifier_for(identity: CallerIdentity) -> MockAccessTokenVerifier {
    let mut verifier = MockAccessTokenVerifier::new();
    verifier.expect_verify().returning(move |token| {
        if token == TEST_TOKEN {
            Ok(identity)
        } else {
            Err(crate::domain::ports::AccessTokenError::invalid("unknown token"))
        }
    });
    verifier
}

/// Caller with a random id and the given role.
pub fn test_caller(role: UserRole) -> CallerIdentity {
    CallerIdentity::new(UserId::random(), role)
}

/// Mock ports that tests customise before building state.
pub struct MockPorts {
    pub tasks: MockTaskCommand,
    pub tasks_query: MockTaskQuery,
    pub categories: MockCategoryCommand,
    pub categories_query: MockCategoryQuery,
    pub accounts: MockAccountCommand,
    pub login: MockLoginService,
    pub tokens: MockAccessTokenVerifier,
}

impl MockPorts {
    /// Mocks with no expectations and a verifier for `identity`.
    pub fn for_caller(identity: CallerIdentity) -> Self {
        Self {
            tasks: MockTaskCommand::new(),
            tasks_query: MockTaskQuery::new(),
            categories: MockCategoryCommand::new(),
            categories_query: MockCategoryQuery::new(),
            accounts: MockAccountCommand::new(),
            login: MockLoginService::new(),
            tokens: verifier_for(identity),
        }
    }

    /// Build HTTP state with a recording translator.
    pub fn into_state(self) -> (HttpState, Arc<RecordingFallbackLog>) {
        let (translator, log) = recording_translator();
        let ports = HttpStatePorts {
            tasks: Arc::new(self.tasks),
            tasks_query: Arc::new(self.tasks_query),
            categories: Arc::new(self.categories),
            categories_query: Arc::new(self.categories_query),
            accounts: Arc::new(self.accounts),
            login: Arc::new(self.login),
            tokens: Arc::new(self.tokens),
        };
        (
            HttpState::new(ports, translator, CancellationToken::new()),
            log,
        )
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TEST_TOKEN}"))
}

/// Application with the full API mounted under `/api/v1`.
pub fn test_app(
    state: HttpState,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    actix_web::App::new()
        .app_data(actix_web::web::Data::new(state))
        .service(actix_web::web::scope("/api/v1").configure(super::configure_api))
}
