//! Helpers shared by the integration test crates.
//!
//! Each file under `tests/` is its own crate and pulls this module in with
//! `mod support;`, so not every helper is used by every crate.

#![allow(dead_code, reason = "each test crate uses a different subset of helpers")]

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{migrate_schema, reset_database};
pub use pg_embed::test_cluster;
