//! Domain ports.
//!
//! Driving ports ([`UsersCommand`], [`UsersQuery`]) are what inbound adapters
//! call; the driven ports ([`UserRepository`], [`ReadinessProbe`]) are what
//! outbound adapters implement.

mod macros;
mod readiness_probe;
mod user_repository;
mod users_command;
mod users_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use readiness_probe::MockReadinessProbe;
pub use readiness_probe::ReadinessProbe;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
