//! Orchestrator probes.
//!
//! The process moves through three phases: starting until the listener is
//! bound, serving, then draining once a shutdown signal arrives. `/health/live`
//! fails only while draining. `/health/ready` passes only while serving and,
//! when a dependency probe is installed, only while it answers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::debug;

use crate::domain::ports::ReadinessProbe;

const STARTING: u8 = 0;
const SERVING: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase plus an optional downstream check.
pub struct HealthState {
    phase: AtomicU8,
    dependency: Option<Arc<dyn ReadinessProbe>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(STARTING),
            dependency: None,
        }
    }
}

impl HealthState {
    /// Starting phase, no dependency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting phase; readiness also requires `probe` to pass.
    pub fn with_dependency(probe: Arc<dyn ReadinessProbe>) -> Self {
        Self {
            phase: AtomicU8::new(STARTING),
            dependency: Some(probe),
        }
    }

    /// Enter the serving phase. Has no effect once draining.
    pub fn mark_ready(&self) {
        let swapped = self
            .phase
            .compare_exchange(STARTING, SERVING, Ordering::AcqRel, Ordering::Acquire);
        if swapped.is_err() {
            debug!("shutdown already started; staying out of rotation");
        }
    }

    /// Enter the draining phase; both probes fail from now on.
    pub fn mark_unhealthy(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    /// Whether the serving phase is active. The dependency is not consulted.
    pub fn is_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == SERVING
    }

    /// Whether the process is not draining.
    pub fn is_alive(&self) -> bool {
        self.phase.load(Ordering::Acquire) != DRAINING
    }

    async fn dependency_answers(&self) -> bool {
        match &self.dependency {
            Some(probe) => probe.is_ready().await,
            None => true,
        }
    }
}

fn probe_response(healthy: bool) -> HttpResponse {
    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving and the database answers"),
        (status = 503, description = "Starting, draining, or the database is unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    // Skip the database round-trip when the phase already says no.
    let healthy = state.is_ready() && state.dependency_answers().await;
    probe_response(healthy)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is up"),
        (status = 503, description = "Process is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
