//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each port call checks a connection out of the shared pool and runs one
//! statement inside its own transaction. Diesel rolls the transaction back
//! when the statement fails, so no partial writes escape.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserFilter, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Build a `LIKE` pattern matching `needle` anywhere in the value.
///
/// `%`, `_` and the escape character itself are escaped so the needle is
/// matched literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(row.id)
        .map_err(|_| UserPersistenceError::decode("stored row has an empty id"))?;
    Ok(User::new(id, row.name, row.email))
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: user.id().as_ref(),
            name: user.name(),
            email: user.email(),
        };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&new_row)
                    .execute(conn)
                    .await
                    .map(|_| ())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = conn
            .transaction(|conn| {
                async move {
                    users::table
                        .select(UserRow::as_select())
                        .load(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_users(rows)
    }

    async fn filter(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let name_pattern = contains_pattern(&filter.name);
        let email_pattern = contains_pattern(&filter.email);

        let rows: Vec<UserRow> = conn
            .transaction(|conn| {
                async move {
                    users::table
                        .filter(users::name.like(name_pattern))
                        .filter(users::email.like(email_pattern))
                        .select(UserRow::as_select())
                        .load(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_users(rows)
    }

    async fn update(&self, user: &User) -> Result<usize, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = user.id().as_ref();
        let changes = UserUpdate {
            name: user.name(),
            email: user.email(),
        };

        conn.transaction(|conn| {
            async move {
                diesel::update(users::table.filter(users::id.eq(id)))
                    .set(&changes)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = id.as_ref();

        let row: Option<UserRow> = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(users::table.filter(users::id.eq(key)))
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserPersistenceError::not_found(key)),
        }
    }
}
