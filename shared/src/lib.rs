//! Shared types for the Telecare order service
//!
//! Wire-format models and the API response envelope used by both the
//! server and the client crates. Pure data types, no I/O.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    MedicineEntry, Order, OrderCreate, OrderDetail, OrderStatus, OrderStatusUpdate, Patient,
    PatientCreate, Pharmacy, PharmacyCreate, Prescription, PrescriptionCreate,
};
pub use response::ApiEnvelope;
