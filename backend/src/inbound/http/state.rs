//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Write-side use-cases.
    pub users_command: Arc<dyn UsersCommand>,
    /// Read-side use-cases.
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from the user ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use users_backend::domain::UserService;
    /// use users_backend::inbound::http::state::HttpState;
    /// use users_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
    /// let service = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(pool))));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
        }
    }
}
