//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_SERVICE_*` environment variables, or a
//! configuration file. The listener fields carry defaults; the rest are
//! optional and their accessors fall back to the constants below.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_DB_HOST: &str = "127.0.0.1";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "landscape-db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Runtime settings for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_SERVICE")]
pub struct ServiceSettings {
    /// Full PostgreSQL connection URL; overrides the discrete `db_*` fields.
    pub database_url: Option<String>,
    /// Database host.
    pub db_host: Option<String>,
    /// Database port.
    pub db_port: Option<u16>,
    /// Database role.
    pub db_user: Option<String>,
    /// Database password.
    pub db_password: Option<String>,
    /// Database name.
    pub db_name: Option<String>,
    /// Address the HTTP server listens on.
    #[ortho_config(default = DEFAULT_HOST.to_owned())]
    pub host: String,
    /// Port the HTTP server listens on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
}

impl ServiceSettings {
    /// Connection URL for the database.
    ///
    /// Uses `database_url` verbatim when set; otherwise assembles one from
    /// the discrete fields and their defaults.
    pub fn database_url(&self) -> String {
        if let Some(url) = self.database_url.as_deref().filter(|url| !url.trim().is_empty()) {
            return url.to_owned();
        }
        format!(
            "postgres://{user}:{password}@{host}:{port}/{name}",
            user = self.db_user.as_deref().unwrap_or(DEFAULT_DB_USER),
            password = self.db_password.as_deref().unwrap_or(DEFAULT_DB_PASSWORD),
            host = self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST),
            port = self.db_port.unwrap_or(DEFAULT_DB_PORT),
            name = self.db_name.as_deref().unwrap_or(DEFAULT_DB_NAME),
        )
    }

    /// Resolve the listen address.
    ///
    /// # Errors
    ///
    /// Returns an error when the host does not resolve to any address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::other(format!("{} resolved to no address", self.host)))
    }

    /// Pool settings derived from this configuration.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url())
            .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE))
            .with_min_idle(Some(
                self.pool_min_idle.unwrap_or(PoolConfig::DEFAULT_MIN_IDLE),
            ))
            .with_connection_timeout(
                self.pool_connection_timeout_secs
                    .map_or(PoolConfig::DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs),
            )
    }
}
