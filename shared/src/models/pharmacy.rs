//! Pharmacy Model

use serde::{Deserialize, Serialize};

/// Pharmacy entity (药房)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: i64,
}

/// Create pharmacy payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyCreate {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}
