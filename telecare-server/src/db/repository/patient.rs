//! Patient Repository

use super::{RepoError, RepoResult};
use crate::db::models::PatientRow;
use crate::utils::time::now_millis;
use shared::models::{Patient, PatientCreate};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn create(pool: &SqlitePool, data: PatientCreate) -> RepoResult<Patient> {
    let id = Uuid::new_v4().to_string();
    let now = now_millis();
    sqlx::query("INSERT INTO patient (id, name, email, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("failed to create patient".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Patient>> {
    let row = sqlx::query_as::<_, PatientRow>(
        "SELECT id, name, email, created_at FROM patient WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Patient::from))
}

pub async fn exists(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patient WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
