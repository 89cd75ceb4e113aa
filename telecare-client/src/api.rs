//! Typed API surface

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;
use shared::models::{
    Order, OrderCreate, OrderDetail, OrderStatus, OrderStatusUpdate, Patient, PatientCreate,
    Pharmacy, PharmacyCreate, Prescription, PrescriptionCreate,
};

/// Outcome of placing an order
#[derive(Debug, Clone)]
pub enum OrderPlacement {
    /// A fresh order was created
    Created(Order),
    /// The server already had an active order for the triple; adopt it
    Existing(Order),
}

impl OrderPlacement {
    /// The authoritative order either way
    pub fn into_order(self) -> Order {
        match self {
            Self::Created(order) | Self::Existing(order) => order,
        }
    }
}

/// Typed client for the Telecare order server
#[derive(Debug, Clone)]
pub struct TelecareClient {
    transport: HttpTransport,
}

impl TelecareClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    /// Place an order.
    ///
    /// A 409 means an active order for the triple already exists; the
    /// server sends it back and the caller adopts it instead of treating
    /// the call as failed.
    pub async fn create_order(&self, payload: &OrderCreate) -> ClientResult<OrderPlacement> {
        match self.transport.post::<Order, _>("api/orders", payload).await {
            Ok(order) => Ok(OrderPlacement::Created(order)),
            Err(ClientError::Api {
                status: 409,
                data: Some(existing),
                ..
            }) => {
                let order: Order = serde_json::from_value(existing)?;
                Ok(OrderPlacement::Existing(order))
            }
            Err(ClientError::Api { status: 409, data: None, code, message }) => {
                Err(ClientError::InvalidResponse(format!(
                    "conflict without order payload ({code}: {message})"
                )))
            }
            Err(e) => Err(e),
        }
    }

    /// A patient's orders, newest first
    pub async fn list_orders(
        &self,
        patient_id: &str,
        prescription_id: Option<&str>,
        pharmacy_id: Option<&str>,
    ) -> ClientResult<Vec<OrderDetail>> {
        let mut path = format!("api/orders?patientId={patient_id}");
        if let Some(rx) = prescription_id {
            path.push_str(&format!("&prescriptionId={rx}"));
        }
        if let Some(ph) = pharmacy_id {
            path.push_str(&format!("&pharmacyId={ph}"));
        }
        self.transport.get(&path).await
    }

    /// Most recent order per pharmacy
    pub async fn latest_per_pharmacy(
        &self,
        patient_id: &str,
        prescription_id: Option<&str>,
    ) -> ClientResult<Vec<OrderDetail>> {
        let mut path = format!("api/orders/latest?patientId={patient_id}");
        if let Some(rx) = prescription_id {
            path.push_str(&format!("&prescriptionId={rx}"));
        }
        self.transport.get(&path).await
    }

    /// Single order with references attached
    pub async fn get_order(&self, order_id: &str) -> ClientResult<OrderDetail> {
        self.transport.get(&format!("api/orders/{order_id}")).await
    }

    /// Pharmacy-side status transition
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> ClientResult<OrderDetail> {
        let body = OrderStatusUpdate {
            status: status.as_str().to_string(),
        };
        self.transport
            .put(&format!("api/orders/{order_id}/status"), &body)
            .await
    }

    /// Pharmacy-side pending queue
    pub async fn pending_orders(&self, pharmacy_id: &str) -> ClientResult<Vec<OrderDetail>> {
        self.transport
            .get(&format!("api/orders/pharmacy/{pharmacy_id}/pending"))
            .await
    }

    /// Pharmacy-side confirmed queue
    pub async fn confirmed_orders(&self, pharmacy_id: &str) -> ClientResult<Vec<OrderDetail>> {
        self.transport
            .get(&format!("api/orders/pharmacy/{pharmacy_id}/confirmed"))
            .await
    }

    /// All pharmacies (the other half of the poll cycle)
    pub async fn list_pharmacies(&self) -> ClientResult<Vec<Pharmacy>> {
        self.transport.get("api/pharmacies").await
    }

    pub async fn create_patient(&self, payload: &PatientCreate) -> ClientResult<Patient> {
        self.transport.post("api/patients", payload).await
    }

    pub async fn create_pharmacy(&self, payload: &PharmacyCreate) -> ClientResult<Pharmacy> {
        self.transport.post("api/pharmacies", payload).await
    }

    pub async fn create_prescription(
        &self,
        payload: &PrescriptionCreate,
    ) -> ClientResult<Prescription> {
        self.transport.post("api/prescriptions", payload).await
    }

    pub async fn get_prescription(&self, id: &str) -> ClientResult<Prescription> {
        self.transport.get(&format!("api/prescriptions/{id}")).await
    }
}
