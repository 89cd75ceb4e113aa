//! Patient row

use shared::models::Patient;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PatientRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: i64,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}
