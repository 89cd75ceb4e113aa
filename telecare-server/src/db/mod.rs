//! Database Module
//!
//! 嵌入式 SQLite：连接池 + 迁移

pub mod models;
pub mod repository;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Open (or create) the order database and bring the schema up to date.
///
/// WAL mode with NORMAL sync: concurrent readers during writes, durable
/// enough for an order log. Foreign keys are enforced; SQLite leaves them
/// off unless asked.
pub async fn connect(db_path: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(|e| AppError::database(format!("invalid database path: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("foreign_keys", "ON")
        .optimize_on_close(true, None);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("failed to open database: {e}")))?;

    // 写锁冲突时等待而非立即报错
    sqlx::query("PRAGMA busy_timeout = 5000;")
        .execute(&pool)
        .await
        .map_err(|e| AppError::database(format!("failed to set busy_timeout: {e}")))?;

    sqlx::migrate!("./migrations")
        .set_ignore_missing(true)
        .run(&pool)
        .await
        .map_err(|e| AppError::database(format!("failed to apply migrations: {e}")))?;

    tracing::info!("Order database ready at {} (WAL, foreign_keys=ON)", db_path);

    Ok(pool)
}
