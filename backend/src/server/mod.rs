//! HTTP server assembly.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::build_health_state;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use users_backend::Trace;
#[cfg(debug_assertions)]
use users_backend::doc::ApiDoc;
use users_backend::domain::Error;
use users_backend::inbound::http::health::{HealthState, live, ready};
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::users::users_scope;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// State cloned into every worker.
#[derive(Clone)]
struct Shared {
    health: web::Data<HealthState>,
    users: web::Data<HttpState>,
}

/// Malformed query strings get the 400 envelope instead of actix's text body.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("Bad request: {err}")).into())
}

/// Register state and routes on one worker's `App`.
fn routes(shared: Shared) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(shared.health)
            .app_data(shared.users)
            .app_data(query_config())
            .service(users_scope())
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }
}

/// Bind the listener and start serving.
///
/// `health_state` enters the serving phase once the socket is bound. OS
/// signals are left to the caller, which stops the server through
/// [`Server::handle`].
///
/// # Errors
///
/// Returns the bind failure.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let shared = Shared {
        health: health_state.clone(),
        users: state_builders::build_db_http_state(&db_pool),
    };

    let server = HttpServer::new(move || App::new().wrap(Trace).configure(routes(shared.clone())))
        .disable_signals()
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
