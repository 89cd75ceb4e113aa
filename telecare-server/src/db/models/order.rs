//! Order rows

use shared::models::{MedicineEntry, Order, OrderStatus};
use sqlx::FromRow;

use crate::db::repository::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: String,
    pub patient_id: String,
    pub pharmacy_id: String,
    pub prescription_id: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OrderRow {
    /// Assemble the wire order with its medicine snapshot.
    ///
    /// The status column is CHECK-constrained, so a parse failure here
    /// means the schema and the enum drifted apart — surfaced as a
    /// database error rather than papered over.
    pub fn into_order(self, medicines: Vec<MedicineEntry>) -> RepoResult<Order> {
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            RepoError::Database(format!("order {} has unknown status {:?}", self.id, self.status))
        })?;
        Ok(Order {
            id: self.id,
            patient_id: self.patient_id,
            pharmacy_id: self.pharmacy_id,
            prescription_id: self.prescription_id,
            status,
            medicines,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Medicine snapshot line, keyed back to its order for batched loads
#[derive(Debug, Clone, FromRow)]
pub struct OrderMedicineRow {
    pub order_id: String,
    pub name: String,
    pub quantity: i32,
    pub morning: bool,
    pub afternoon: bool,
    pub night: bool,
}

impl From<OrderMedicineRow> for MedicineEntry {
    fn from(row: OrderMedicineRow) -> Self {
        MedicineEntry {
            name: row.name,
            quantity: row.quantity,
            morning: row.morning,
            afternoon: row.afternoon,
            night: row.night,
        }
    }
}
