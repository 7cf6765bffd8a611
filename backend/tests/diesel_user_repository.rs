//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test provisions its own database on a shared embedded cluster, runs
//! the migrations, and drives the repository through a dedicated Tokio
//! runtime.

use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use users_backend::domain::ports::{UserPersistenceError, UserRepository};
use users_backend::domain::{User, UserFilter, UserId};
use users_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use uuid::Uuid;

mod support;

use support::embedded_postgres::{drop_users_table, insert_raw_user};
use support::{handle_cluster_setup_failure, migrate_schema, reset_database, test_cluster};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselUserRepository,
    database_url: String,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }
}

fn user(id: &str, name: &str, email: &str) -> User {
    User::new(UserId::new(id).expect("valid id"), name, email)
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let db_name = format!("users_repo_{}", Uuid::new_v4().simple());
    reset_database(&cluster, &db_name)?;
    let database_url = cluster.connection().database_url(&db_name);
    migrate_schema(&database_url)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselUserRepository::new(pool),
        database_url,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn create_then_list_all_round_trips(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_then_list_all_round_trips skipped");
        return;
    };
    let ramiro = user("a", "Ramiro", "Ramiro@ramiro.com");

    ctx.block_on(ctx.repository.create(&ramiro))
        .expect("insert succeeds");
    let users = ctx
        .block_on(ctx.repository.list_all())
        .expect("select succeeds");

    assert_eq!(users, vec![ramiro]);
}

#[rstest]
fn duplicate_ids_are_rejected(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_ids_are_rejected skipped");
        return;
    };
    let first = user("dup", "Ramiro", "Ramiro@ramiro.com");

    ctx.block_on(ctx.repository.create(&first))
        .expect("first insert succeeds");
    let err = ctx
        .block_on(ctx.repository.create(&first))
        .expect_err("second insert conflicts");

    assert_eq!(err, UserPersistenceError::query("user id already exists"));
}

#[rstest]
fn filter_matches_substrings_literally(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: filter_matches_substrings_literally skipped");
        return;
    };
    for row in [
        user("a", "Ramiro", "Ramiro@ramiro.com"),
        user("b", "Lucia", "lucia@example.com"),
        user("c", "100%_Bob", "bob@ramiro.com"),
    ] {
        ctx.block_on(ctx.repository.create(&row)).expect("insert");
    }

    let everyone = ctx
        .block_on(ctx.repository.filter(&UserFilter::default()))
        .expect("empty filter");
    let ramiro = ctx
        .block_on(ctx.repository.filter(&UserFilter::new("Ramiro", "@ramiro.com")))
        .expect("name and email filter");
    let literal = ctx
        .block_on(ctx.repository.filter(&UserFilter::new("%_", "")))
        .expect("wildcards are literal");

    assert_eq!(everyone.len(), 3);
    assert_eq!(ramiro, vec![user("a", "Ramiro", "Ramiro@ramiro.com")]);
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].id().as_ref(), "c");
}

#[rstest]
fn update_reports_affected_rows(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_reports_affected_rows skipped");
        return;
    };
    ctx.block_on(ctx.repository.create(&user("a", "Ramiro", "Ramiro@ramiro.com")))
        .expect("insert");

    let hit = ctx
        .block_on(ctx.repository.update(&user("a", "Ramiro Jr", "jr@ramiro.com")))
        .expect("update existing");
    let miss = ctx
        .block_on(ctx.repository.update(&user("zzz", "Nobody", "no@body.com")))
        .expect("update missing");
    let users = ctx.block_on(ctx.repository.list_all()).expect("select");

    assert_eq!((hit, miss), (1, 0));
    assert_eq!(users, vec![user("a", "Ramiro Jr", "jr@ramiro.com")]);
}

#[rstest]
fn delete_returns_row_and_misses_are_not_found(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_returns_row_and_misses_are_not_found skipped");
        return;
    };
    let ramiro = user("a", "Ramiro", "Ramiro@ramiro.com");
    ctx.block_on(ctx.repository.create(&ramiro)).expect("insert");
    let id = ramiro.id().clone();

    let removed = ctx.block_on(ctx.repository.delete(&id)).expect("delete");
    let again = ctx
        .block_on(ctx.repository.delete(&id))
        .expect_err("second delete misses");

    assert_eq!(removed, ramiro);
    assert_eq!(again, UserPersistenceError::not_found("a"));
    assert!(ctx.block_on(ctx.repository.list_all()).expect("select").is_empty());
}

#[rstest]
fn rows_written_elsewhere_are_not_revalidated(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: rows_written_elsewhere_are_not_revalidated skipped");
        return;
    };
    insert_raw_user(&ctx.database_url, "legacy", "Al", "no-at-sign").expect("raw insert");

    let users = ctx.block_on(ctx.repository.list_all()).expect("select");

    assert_eq!(users, vec![user("legacy", "Al", "no-at-sign")]);
}

#[rstest]
fn missing_table_is_a_query_error(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_table_is_a_query_error skipped");
        return;
    };
    drop_users_table(&ctx.database_url).expect("drop table");

    let err = ctx
        .block_on(ctx.repository.list_all())
        .expect_err("select fails");

    assert_eq!(err, UserPersistenceError::query("database error"));
}
