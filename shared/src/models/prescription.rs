//! Prescription Model

use serde::{Deserialize, Serialize};

use super::order::MedicineEntry;

/// Prescription entity (处方)
///
/// Written by the doctor side; orders copy its medicine list at creation
/// time so later edits to the prescription never mutate placed orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineEntry>,
    pub created_at: i64,
}

/// Create prescription payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionCreate {
    pub patient_id: String,
    pub doctor_name: String,
    pub notes: Option<String>,
    pub medicines: Vec<MedicineEntry>,
}
