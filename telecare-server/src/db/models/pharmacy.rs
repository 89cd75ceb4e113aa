//! Pharmacy row

use shared::models::Pharmacy;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PharmacyRow {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: i64,
}

impl From<PharmacyRow> for Pharmacy {
    fn from(row: PharmacyRow) -> Self {
        Pharmacy {
            id: row.id,
            name: row.name,
            address: row.address,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}
