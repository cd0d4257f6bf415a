//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::AppSettings;
pub use state_builders::{build_services, ensure_admin_account};

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};

use taskboard::trace_requests;
#[cfg(debug_assertions)]
use taskboard::doc::ApiDoc;
use taskboard::inbound::http::configure_api;
use taskboard::inbound::http::health::{HealthState, live, ready};
use taskboard::inbound::http::state::HttpState;
use tokio_util::sync::CancellationToken;
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Listener address plus the state shared by every worker.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    http_state: web::Data<HttpState>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(from_fn(trace_requests))
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix server.
///
/// Signal handling is disabled; the caller owns shutdown so it can cancel
/// in-flight request tokens before the server drains.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `stop` to drain in-flight requests, cancelling their tokens only
/// if draining outlasts `grace`.
///
/// Returns `true` when the grace period expired and requests were cancelled.
pub async fn drain_then_cancel(
    stop: impl Future<Output = ()>,
    shutdown: &CancellationToken,
    grace: Duration,
) -> bool {
    tokio::pin!(stop);
    tokio::select! {
        () = &mut stop => false,
        () = tokio::time::sleep(grace) => {
            warn!(grace_secs = grace.as_secs(), "drain timed out; cancelling in-flight requests");
            shutdown.cancel();
            stop.await;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    //! Shutdown sequencing.
    use super::*;

    #[tokio::test]
    async fn quick_drain_leaves_requests_uncancelled() {
        let shutdown = CancellationToken::new();

        let cancelled =
            drain_then_cancel(std::future::ready(()), &shutdown, Duration::from_secs(5)).await;

        assert!(!cancelled);
        assert!(!shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn stalled_drain_cancels_after_grace() {
        let shutdown = CancellationToken::new();
        let request = shutdown.child_token();
        let in_flight = async move { request.cancelled().await };

        let cancelled =
            drain_then_cancel(in_flight, &shutdown, Duration::from_millis(20)).await;

        assert!(cancelled);
        assert!(shutdown.is_cancelled());
    }
}
