//! Order Repository
//!
//! 订单去重不走“先查再插”：活跃订单的唯一性由部分唯一索引保证，
//! 并发创建时败者拿到唯一约束冲突，再回读胜者返回给调用方。

use std::collections::{HashMap, HashSet};

use super::{RepoError, RepoResult};
use crate::db::models::{OrderMedicineRow, OrderRow};
use crate::utils::time::now_millis;
use shared::models::{MedicineEntry, Order, OrderCreate, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const ORDER_COLUMNS: &str =
    "id, patient_id, pharmacy_id, prescription_id, status, created_at, updated_at";

/// Outcome of a create attempt
#[derive(Debug)]
pub enum CreateOutcome {
    /// A fresh pending order was persisted
    Created(Order),
    /// An active order for the triple already exists; no side effects
    DuplicateActive(Order),
}

/// Create a pending order carrying the given medicine snapshot.
///
/// If an active order already exists for the (patient, pharmacy,
/// prescription) triple, the insert loses against the partial unique index
/// and the existing order is returned instead. The retry covers the narrow
/// window where the winner reached a terminal status between our insert
/// and the re-read.
pub async fn create(
    pool: &SqlitePool,
    data: &OrderCreate,
    medicines: &[MedicineEntry],
) -> RepoResult<CreateOutcome> {
    for _ in 0..2 {
        match try_insert(pool, data, medicines).await {
            Ok(order) => return Ok(CreateOutcome::Created(order)),
            Err(RepoError::Duplicate(_)) => {
                if let Some(existing) = find_active_for_triple(
                    pool,
                    &data.patient_id,
                    &data.pharmacy_id,
                    &data.prescription_id,
                )
                .await?
                {
                    return Ok(CreateOutcome::DuplicateActive(existing));
                }
                // blocker completed in the gap; insert again
            }
            Err(e) => return Err(e),
        }
    }
    Err(RepoError::Database(
        "order create kept colliding with a vanishing active order".into(),
    ))
}

async fn try_insert(
    pool: &SqlitePool,
    data: &OrderCreate,
    medicines: &[MedicineEntry],
) -> RepoResult<Order> {
    let id = Uuid::new_v4().to_string();
    let now = now_millis();

    let mut tx = pool.begin().await?;
    let inserted = sqlx::query(
        "INSERT INTO pharmacy_order \
         (id, patient_id, pharmacy_id, prescription_id, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 'pending', ?, ?)",
    )
    .bind(&id)
    .bind(&data.patient_id)
    .bind(&data.pharmacy_id)
    .bind(&data.prescription_id)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(RepoError::Duplicate(
                "active order already exists for this triple".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    for m in medicines {
        sqlx::query(
            "INSERT INTO order_medicine (order_id, name, quantity, morning, afternoon, night) \
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
        .ok_or_else(|| RepoError::Database("failed to create order".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM pharmacy_order WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let medicines = medicines_for(pool, std::slice::from_ref(&row.id))
        .await?
        .remove(&row.id)
        .unwrap_or_default();
    Ok(Some(row.into_order(medicines)?))
}

/// The active order for a triple, if any (there is at most one)
pub async fn find_active_for_triple(
    pool: &SqlitePool,
    patient_id: &str,
    pharmacy_id: &str,
    prescription_id: &str,
) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM pharmacy_order \
         WHERE patient_id = ? AND pharmacy_id = ? AND prescription_id = ? \
           AND status IN ('pending', 'confirmed', 'ready')"
    ))
    .bind(patient_id)
    .bind(pharmacy_id)
    .bind(prescription_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let medicines = medicines_for(pool, std::slice::from_ref(&row.id))
        .await?
        .remove(&row.id)
        .unwrap_or_default();
    Ok(Some(row.into_order(medicines)?))
}

/// A patient's orders, newest first, optionally narrowed by prescription
/// and/or pharmacy
pub async fn list(
    pool: &SqlitePool,
    patient_id: &str,
    prescription_id: Option<&str>,
    pharmacy_id: Option<&str>,
) -> RepoResult<Vec<Order>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {ORDER_COLUMNS} FROM pharmacy_order WHERE patient_id = "
    ));
    qb.push_bind(patient_id);
    if let Some(rx) = prescription_id {
        qb.push(" AND prescription_id = ");
        qb.push_bind(rx);
    }
    if let Some(ph) = pharmacy_id {
        qb.push(" AND pharmacy_id = ");
        qb.push_bind(ph);
    }
    // rowid 兜底：同一毫秒内创建的订单按插入先后排序
    qb.push(" ORDER BY created_at DESC, rowid DESC");

    let rows: Vec<OrderRow> = qb.build_query_as().fetch_all(pool).await?;
    attach_medicines(pool, rows).await
}

/// Most recent order per pharmacy for one patient.
///
/// The list is already newest-first, so the first row seen per pharmacy
/// wins; this is a small grouping, not a general aggregation.
pub async fn latest_per_pharmacy(
    pool: &SqlitePool,
    patient_id: &str,
    prescription_id: Option<&str>,
) -> RepoResult<Vec<Order>> {
    let all = list(pool, patient_id, prescription_id, None).await?;
    let mut seen = HashSet::new();
    let mut latest = Vec::new();
    for order in all {
        if seen.insert(order.pharmacy_id.clone()) {
            latest.push(order);
        }
    }
    Ok(latest)
}

/// Pharmacy-side queue: this pharmacy's orders in the given status
pub async fn find_by_pharmacy_and_status(
    pool: &SqlitePool,
    pharmacy_id: &str,
    status: OrderStatus,
) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM pharmacy_order \
         WHERE pharmacy_id = ? AND status = ? \
         ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(pharmacy_id)
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;
    attach_medicines(pool, rows).await
}

/// Persist a status transition; the caller has already validated the value
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: OrderStatus,
) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE pharmacy_order SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

async fn attach_medicines(pool: &SqlitePool, rows: Vec<OrderRow>) -> RepoResult<Vec<Order>> {
    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let mut grouped = medicines_for(pool, &ids).await?;
    rows.into_iter()
        .map(|row| {
            let medicines = grouped.remove(&row.id).unwrap_or_default();
            row.into_order(medicines)
        })
        .collect()
}

/// Batched snapshot load: one query for any number of orders
async fn medicines_for(
    pool: &SqlitePool,
    order_ids: &[String],
) -> RepoResult<HashMap<String, Vec<MedicineEntry>>> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT order_id, name, quantity, morning, afternoon, night \
         FROM order_medicine WHERE order_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in order_ids {
        separated.push_bind(id);
    }
    qb.push(") ORDER BY id");

    let rows: Vec<OrderMedicineRow> = qb.build_query_as().fetch_all(pool).await?;
    let mut grouped: HashMap<String, Vec<MedicineEntry>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.order_id.clone())
            .or_default()
            .push(MedicineEntry::from(row));
    }
    Ok(grouped)
}
