//! Wire-format assembly helpers
//!
//! List views carry the referenced patient / pharmacy / prescription so the
//! mobile client can render without extra round trips. References are
//! resolved once per distinct id, not once per order.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::db::repository::{patient, pharmacy, prescription};
use crate::utils::AppResult;
use shared::models::{Order, OrderDetail, Patient, Pharmacy, Prescription};

/// Attach display references to a batch of orders
pub async fn to_order_details(
    pool: &SqlitePool,
    orders: Vec<Order>,
) -> AppResult<Vec<OrderDetail>> {
    let mut patients: HashMap<String, Option<Patient>> = HashMap::new();
    let mut pharmacies: HashMap<String, Option<Pharmacy>> = HashMap::new();
    let mut prescriptions: HashMap<String, Option<Prescription>> = HashMap::new();

    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        if !patients.contains_key(&order.patient_id) {
            let loaded = patient::find_by_id(pool, &order.patient_id).await?;
            patients.insert(order.patient_id.clone(), loaded);
        }
        if !pharmacies.contains_key(&order.pharmacy_id) {
            let loaded = pharmacy::find_by_id(pool, &order.pharmacy_id).await?;
            pharmacies.insert(order.pharmacy_id.clone(), loaded);
        }
        if !prescriptions.contains_key(&order.prescription_id) {
            let loaded = prescription::find_by_id(pool, &order.prescription_id).await?;
            prescriptions.insert(order.prescription_id.clone(), loaded);
        }

        details.push(OrderDetail {
            patient: patients[&order.patient_id].clone(),
            pharmacy: pharmacies[&order.pharmacy_id].clone(),
            prescription: prescriptions[&order.prescription_id].clone(),
            order,
        });
    }
    Ok(details)
}

/// Attach display references to a single order
pub async fn to_order_detail(pool: &SqlitePool, order: Order) -> AppResult<OrderDetail> {
    let mut details = to_order_details(pool, vec![order]).await?;
    // one in, one out
    Ok(details.remove(0))
}
