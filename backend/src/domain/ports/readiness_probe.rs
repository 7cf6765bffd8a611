//! Driven port for dependency readiness checks.

use async_trait::async_trait;

/// Reports whether a backing dependency can currently serve requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Return `true` when the dependency answered a trivial request.
    async fn is_ready(&self) -> bool;
}
