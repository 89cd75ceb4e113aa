//! Prescription rows

use shared::models::{MedicineEntry, Prescription};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PrescriptionRow {
    pub id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl PrescriptionRow {
    /// 组装处方及其药品列表
    pub fn into_prescription(self, medicines: Vec<MedicineEntry>) -> Prescription {
        Prescription {
            id: self.id,
            patient_id: self.patient_id,
            doctor_name: self.doctor_name,
            notes: self.notes,
            medicines,
            created_at: self.created_at,
        }
    }
}

/// Medicine line of a prescription, with the owning prescription id so
/// batched loads can group rows back onto their parents.
#[derive(Debug, Clone, FromRow)]
pub struct PrescriptionMedicineRow {
    pub prescription_id: String,
    pub name: String,
    pub quantity: i32,
    pub morning: bool,
    pub afternoon: bool,
    pub night: bool,
}

impl From<PrescriptionMedicineRow> for MedicineEntry {
    fn from(row: PrescriptionMedicineRow) -> Self {
        MedicineEntry {
            name: row.name,
            quantity: row.quantity,
            morning: row.morning,
            afternoon: row.afternoon,
            night: row.night,
        }
    }
}
