//! Pharmacy Repository

use super::{RepoError, RepoResult};
use crate::db::models::PharmacyRow;
use crate::utils::time::now_millis;
use shared::models::{Pharmacy, PharmacyCreate};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn create(pool: &SqlitePool, data: PharmacyCreate) -> RepoResult<Pharmacy> {
    let id = Uuid::new_v4().to_string();
    let now = now_millis();
    sqlx::query("INSERT INTO pharmacy (id, name, address, phone, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(&id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("failed to create pharmacy".into()))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Pharmacy>> {
    let rows = sqlx::query_as::<_, PharmacyRow>(
        "SELECT id, name, address, phone, created_at FROM pharmacy ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Pharmacy::from).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Pharmacy>> {
    let row = sqlx::query_as::<_, PharmacyRow>(
        "SELECT id, name, address, phone, created_at FROM pharmacy WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Pharmacy::from))
}

pub async fn exists(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pharmacy WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
