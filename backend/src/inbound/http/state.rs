//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::ports::{
    AccessTokenVerifier, AccountCommand, CategoryCommand, CategoryQuery, LoginService,
    TaskCommand, TaskQuery,
};

use super::translator::ResponseTranslator;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
    pub categories: Arc<dyn CategoryCommand>,
    pub categories_query: Arc<dyn CategoryQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn AccessTokenVerifier>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
    pub categories: Arc<dyn CategoryCommand>,
    pub categories_query: Arc<dyn CategoryQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn AccessTokenVerifier>,
    /// Maps failed outcomes and rejected payloads onto response bodies.
    pub translator: ResponseTranslator,
    /// Parent of every request-scoped cancellation token.
    pub shutdown: CancellationToken,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(
        ports: HttpStatePorts,
        translator: ResponseTranslator,
        shutdown: CancellationToken,
    ) -> Self {
        let HttpStatePorts {
            tasks,
            tasks_query,
            categories,
            categories_query,
            accounts,
            login,
            tokens,
        } = ports;
        Self {
            tasks,
            tasks_query,
            categories,
            categories_query,
            accounts,
            login,
            tokens,
            translator,
            shutdown,
        }
    }
}
