//! Task board entry point: loads settings, prepares the database, bootstraps
//! the admin account and serves the REST API until SIGINT or SIGTERM.

mod server;

use std::io;
use std::time::Duration;

use actix_web::web;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    AppSettings, ServerConfig, build_services, create_server, drain_then_cancel,
    ensure_admin_account,
};
use taskboard::inbound::http::health::HealthState;
use taskboard::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Time in-flight requests get to finish before their tokens are cancelled.
/// Kept below actix's 30 second worker shutdown timeout.
const DRAIN_GRACE: Duration = Duration::from_secs(20);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = AppSettings::load_settings()
        .and_then(AppSettings::validate)
        .map_err(io::Error::other)?;

    let pool_config =
        PoolConfig::new(settings.database_url.as_str()).with_max_size(settings.db_max_connections);
    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    if settings.run_migrations {
        run_pending_migrations(&settings.database_url)
            .await
            .map_err(io::Error::other)?;
    }

    let shutdown = CancellationToken::new();
    let services = build_services(&pool, &settings, shutdown.clone());
    if let Some(admin) = settings.admin.clone() {
        ensure_admin_account(services.accounts.as_ref(), admin, &shutdown)
            .await
            .map_err(io::Error::other)?;
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, services.http_state),
    )?;
    info!(bind_addr = %settings.bind_addr, "server listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown requested");
        health_state.mark_unhealthy();
        drain_then_cancel(handle.stop(true), &shutdown, DRAIN_GRACE).await;
        shutdown.cancel();
    });

    server.await
}
