//! Backend entry-point: loads settings, connects to PostgreSQL, and serves
//! the users API.

use actix_web::dev::ServerHandle;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use users_backend::inbound::http::health::HealthState;
use users_backend::outbound::persistence::DbPool;
use users_backend::settings::ServiceSettings;

mod server;

use server::{ServerConfig, build_health_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr()?;

    let pool = DbPool::new(settings.pool_config())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let health_state = build_health_state(&pool);
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, pool))?;
    info!(%bind_addr, "users service listening");

    actix_web::rt::spawn(drain_on_signal(health_state, server.handle()));
    server.await
}

/// Wait for SIGINT or SIGTERM, fail liveness, then stop gracefully.
async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    shutdown_signal().await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for ctrl-c");
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
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
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
