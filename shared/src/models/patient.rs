//! Patient Model

use serde::{Deserialize, Serialize};

/// Patient entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: i64,
}

/// Create patient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCreate {
    pub name: String,
    pub email: Option<String>,
}
