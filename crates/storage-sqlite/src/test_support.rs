//! Temporary databases for repository tests.

use diesel::RunQueryDsl;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, get_connection, run_migrations, spawn_writer, DbPool, WriteHandle};

/// A migrated database in a temp directory. Keep `_temp_dir` alive for the
/// duration of the test.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    pub _temp_dir: TempDir,
}

pub fn setup_db() -> TestDb {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    crate::db::init(&db_path_str).expect("Failed to initialize database");
    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestDb {
        pool,
        writer,
        _temp_dir: temp_dir,
    }
}

/// Inserts an account row directly to satisfy foreign keys.
pub fn create_test_account(pool: &DbPool, account_id: &str) {
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::sql_query(format!(
        "INSERT INTO accounts (id, name, account_type, currency, is_active, created_at, updated_at) \
         VALUES ('{}', 'Test Account', 'LIABILITY', 'USD', true, datetime('now'), datetime('now'))",
        account_id
    ))
    .execute(&mut conn)
    .expect("Failed to create test account");
}
