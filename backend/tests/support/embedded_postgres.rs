//! Database reset and schema setup for embedded PostgreSQL suites.
//!
//! - Database reset uses `postgres` directly so no transaction wraps
//!   `DROP DATABASE`.
//! - Schema setup runs the embedded Diesel migrations so test schemas do not
//!   drift from `backend/migrations`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// `postgres::Error`'s `Display` is just "db error" for server-side
/// failures; pull out SQLSTATE and message so test output says what broke.
fn describe(err: &postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => format!("{} ({}): {}", db.message(), db.code().code(), db.detail().unwrap_or("")),
        None => err.to_string(),
    }
}

/// Drop and recreate `name` on the cluster.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| describe(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| describe(&err))
}

/// Runs all pending Diesel migrations against the test database.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("{err:?}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err:?}"))?;
    Ok(())
}

/// Insert a row directly, bypassing the repository.
pub fn insert_raw_user(url: &str, id: &str, name: &str, email: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| describe(&err))?;
    client
        .execute(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3)",
            &[&id, &name, &email],
        )
        .map_err(|err| describe(&err))?;
    Ok(())
}

/// Drop the `users` table to simulate schema loss.
pub fn drop_users_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| describe(&err))?;
    client
        .batch_execute("DROP TABLE IF EXISTS users;")
        .map_err(|err| describe(&err))
}
