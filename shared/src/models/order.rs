//! Order Model
//!
//! 订单在 (patient, pharmacy, prescription) 三元组上去重：
//! 同一三元组同时最多只能有一个活跃状态的订单。

use serde::{Deserialize, Serialize};

use super::{Patient, Pharmacy, Prescription};

/// Order status enum
///
/// Active statuses (`Pending`, `Confirmed`, `Ready`) block creation of a
/// duplicate order for the same triple; terminal statuses do not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Rejected,
    Ready,
    /// 旧版客户端仍会发送 "delivered"，按 completed 处理
    #[serde(alias = "delivered")]
    Completed,
}

impl OrderStatus {
    /// All accepted input values, for error messages
    pub const ACCEPTED: &'static [&'static str] = &[
        "pending",
        "confirmed",
        "rejected",
        "ready",
        "completed",
        "delivered",
    ];

    /// Whether this status blocks creation of a duplicate order
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Ready)
    }

    /// Canonical wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }

    /// Parse a wire string, tolerating the legacy `delivered` value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "rejected" => Some(Self::Rejected),
            "ready" => Some(Self::Ready),
            "completed" | "delivered" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Medicine snapshot entry
///
/// Copied from the prescription when the order is placed. The flags mark
/// the times of day the medicine is taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicineEntry {
    pub name: String,
    pub quantity: i32,
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub afternoon: bool,
    #[serde(default)]
    pub night: bool,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub patient_id: String,
    pub pharmacy_id: String,
    pub prescription_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub medicines: Vec<MedicineEntry>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub patient_id: String,
    pub pharmacy_id: String,
    pub prescription_id: String,
}

/// Update status payload
///
/// The status arrives as a raw string so the server can reject unknown
/// values with a 400 instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: String,
}

/// Order with referenced display data attached (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub patient: Option<Patient>,
    pub pharmacy: Option<Pharmacy>,
    pub prescription: Option<Prescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_canonical_values() {
        for s in ["pending", "confirmed", "rejected", "ready", "completed"] {
            let parsed = OrderStatus::parse(s).unwrap();
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn legacy_delivered_normalizes_to_completed() {
        assert_eq!(OrderStatus::parse("delivered"), Some(OrderStatus::Completed));

        // serde path tolerates it too
        let parsed: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Completed);
        // but it is never emitted
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"completed\"");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("PENDING"), None);
    }

    #[test]
    fn active_statuses_block_duplicates() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Confirmed.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Rejected.is_active());
        assert!(!OrderStatus::Completed.is_active());
    }

    #[test]
    fn order_serializes_camel_case() {
        let order = Order {
            id: "o1".into(),
            patient_id: "p1".into(),
            pharmacy_id: "ph1".into(),
            prescription_id: "rx1".into(),
            status: OrderStatus::Pending,
            medicines: vec![MedicineEntry {
                name: "Amoxicillin".into(),
                quantity: 14,
                morning: true,
                afternoon: false,
                night: true,
            }],
            created_at: 1,
            updated_at: 1,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["patientId"], "p1");
        assert_eq!(json["prescriptionId"], "rx1");
        assert_eq!(json["medicines"][0]["name"], "Amoxicillin");
    }
}
