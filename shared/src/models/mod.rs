//! Wire-format models
//!
//! Field names serialize in camelCase to match the mobile client's JSON
//! contract. Timestamps are unix milliseconds.

pub mod order;
pub mod patient;
pub mod pharmacy;
pub mod prescription;

pub use order::{MedicineEntry, Order, OrderCreate, OrderDetail, OrderStatus, OrderStatusUpdate};
pub use patient::{Patient, PatientCreate};
pub use pharmacy::{Pharmacy, PharmacyCreate};
pub use prescription::{Prescription, PrescriptionCreate};
