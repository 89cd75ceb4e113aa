//! Prescription Repository

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use crate::db::models::{PrescriptionMedicineRow, PrescriptionRow};
use crate::utils::time::now_millis;
use shared::models::{MedicineEntry, Prescription, PrescriptionCreate};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn create(pool: &SqlitePool, data: PrescriptionCreate) -> RepoResult<Prescription> {
    let id = Uuid::new_v4().to_string();
    let now = now_millis();

    // 处方主行 + 药品行在同一事务中写入
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO prescription (id, patient_id, doctor_name, notes, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&data.patient_id)
    .bind(&data.doctor_name)
    .bind(&data.notes)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for m in &data.medicines {
        sqlx::query(
            "INSERT INTO prescription_medicine \
             (prescription_id, name, quantity, morning, afternoon, night) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&m.name)
        .bind(m.quantity)
        .bind(m.morning)
        .bind(m.afternoon)
        .bind(m.night)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("failed to create prescription".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Prescription>> {
    let row = sqlx::query_as::<_, PrescriptionRow>(
        "SELECT id, patient_id, doctor_name, notes, created_at FROM prescription WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let medicines = sqlx::query_as::<_, PrescriptionMedicineRow>(
        "SELECT prescription_id, name, quantity, morning, afternoon, night \
         FROM prescription_medicine WHERE prescription_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(MedicineEntry::from)
    .collect();

    Ok(Some(row.into_prescription(medicines)))
}

/// All prescriptions of one patient, newest first
pub async fn find_by_patient(pool: &SqlitePool, patient_id: &str) -> RepoResult<Vec<Prescription>> {
    let rows = sqlx::query_as::<_, PrescriptionRow>(
        "SELECT id, patient_id, doctor_name, notes, created_at \
         FROM prescription WHERE patient_id = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    // 一次性取回该患者全部药品行，再按处方分组
    let medicine_rows = sqlx::query_as::<_, PrescriptionMedicineRow>(
        "SELECT pm.prescription_id, pm.name, pm.quantity, pm.morning, pm.afternoon, pm.night \
         FROM prescription_medicine pm \
         JOIN prescription p ON p.id = pm.prescription_id \
         WHERE p.patient_id = ? ORDER BY pm.id",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<String, Vec<MedicineEntry>> = HashMap::new();
    for m in medicine_rows {
        grouped
            .entry(m.prescription_id.clone())
            .or_default()
            .push(MedicineEntry::from(m));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let medicines = grouped.remove(&row.id).unwrap_or_default();
            row.into_prescription(medicines)
        })
        .collect())
}

pub async fn exists(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prescription WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
