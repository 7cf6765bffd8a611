//! Builders wiring persistence adapters into HTTP and health state.

use std::sync::Arc;

use actix_web::web;

use users_backend::domain::UserService;
use users_backend::domain::ports::UserRepository;
use users_backend::inbound::http::health::HealthState;
use users_backend::inbound::http::state::HttpState;
use users_backend::outbound::persistence::{DbPool, DieselUserRepository};

/// Build handler state around a user repository.
pub(crate) fn build_http_state(repository: Arc<dyn UserRepository>) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(repository));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// Build handler state backed by the Diesel repository.
pub(crate) fn build_db_http_state(pool: &DbPool) -> web::Data<HttpState> {
    build_http_state(Arc::new(DieselUserRepository::new(pool.clone())))
}

/// Health state whose readiness probe pings the pool.
pub(crate) fn build_health_state(pool: &DbPool) -> web::Data<HealthState> {
    web::Data::new(HealthState::with_dependency(Arc::new(pool.clone())))
}
