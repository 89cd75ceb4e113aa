//! Row types for the SQLite tables
//!
//! These map 1:1 onto the schema and convert into the wire models from
//! `shared::models`. Keeping `FromRow` on this side means the client
//! crates never link sqlx.

pub mod order;
pub mod patient;
pub mod pharmacy;
pub mod prescription;

pub use order::{OrderMedicineRow, OrderRow};
pub use patient::PatientRow;
pub use pharmacy::PharmacyRow;
pub use prescription::{PrescriptionMedicineRow, PrescriptionRow};
