//! Order polling loop
//!
//! 固定间隔轮询：每个周期并发拉取药房列表和 latest-per-pharmacy 订单，
//! 打上递增世代号后交给 reducer。组件停止时取消定时器即可；在途请求
//! 不需要中止 —— 它的世代号一定输给后来的快照。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::{OrderPlacement, TelecareClient};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::reconcile::{BoardEvent, OrderBoard, OrderSlot};
use shared::models::{Order, OrderCreate, Pharmacy};

/// Keeps a patient's "orders per pharmacy" view approximately fresh
#[derive(Debug)]
pub struct OrderSync {
    client: TelecareClient,
    patient_id: String,
    /// Narrow the poll to one prescription, if set
    prescription_id: Option<String>,
    poll_interval: std::time::Duration,

    board: Mutex<OrderBoard>,
    pharmacies: Mutex<Vec<Pharmacy>>,
    /// Poll cycle counter; stamped onto every snapshot
    generation: AtomicU64,
}

impl OrderSync {
    pub fn new(
        config: &ClientConfig,
        patient_id: impl Into<String>,
        prescription_id: Option<String>,
    ) -> ClientResult<Arc<Self>> {
        Ok(Arc::new(Self {
            client: TelecareClient::new(config)?,
            patient_id: patient_id.into(),
            prescription_id,
            poll_interval: config.poll_interval,
            board: Mutex::new(OrderBoard::new()),
            pharmacies: Mutex::new(Vec::new()),
            generation: AtomicU64::new(0),
        }))
    }

    /// The underlying typed client
    pub fn client(&self) -> &TelecareClient {
        &self.client
    }

    /// Last fetched pharmacy list
    pub fn pharmacies(&self) -> Vec<Pharmacy> {
        self.pharmacies.lock().expect("pharmacies lock").clone()
    }

    /// Current slot for one pharmacy
    pub fn slot(&self, pharmacy_id: &str) -> Option<OrderSlot> {
        self.board
            .lock()
            .expect("board lock")
            .slot(pharmacy_id)
            .cloned()
    }

    /// Snapshot of the whole board, for rendering
    pub fn board_snapshot(&self) -> Vec<(String, OrderSlot)> {
        self.board
            .lock()
            .expect("board lock")
            .slots()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn apply(&self, event: BoardEvent) {
        self.board.lock().expect("board lock").apply(event);
    }

    /// Place an order with an optimistic local update.
    ///
    /// The placeholder is written before the request goes out; the
    /// response (success, conflict, or failure) settles the slot.
    pub async fn place_order(
        &self,
        pharmacy_id: &str,
        prescription_id: &str,
    ) -> ClientResult<Order> {
        self.apply(BoardEvent::PlaceRequested {
            pharmacy_id: pharmacy_id.to_string(),
            prescription_id: prescription_id.to_string(),
        });

        let payload = OrderCreate {
            patient_id: self.patient_id.clone(),
            pharmacy_id: pharmacy_id.to_string(),
            prescription_id: prescription_id.to_string(),
        };
        match self.client.create_order(&payload).await {
            Ok(OrderPlacement::Created(order)) => {
                self.apply(BoardEvent::PlaceSucceeded {
                    pharmacy_id: pharmacy_id.to_string(),
                    order: order.clone(),
                });
                Ok(order)
            }
            Ok(OrderPlacement::Existing(existing)) => {
                tracing::info!(
                    pharmacy_id,
                    order_id = %existing.id,
                    "adopting existing active order"
                );
                self.apply(BoardEvent::PlaceConflicted {
                    pharmacy_id: pharmacy_id.to_string(),
                    existing: existing.clone(),
                });
                Ok(existing)
            }
            Err(e) => {
                self.apply(BoardEvent::PlaceFailed {
                    pharmacy_id: pharmacy_id.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// One poll cycle: concurrent fetch, then a generation-stamped apply
    pub async fn poll_once(&self) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (pharmacies, latest) = tokio::try_join!(
            self.client.list_pharmacies(),
            self.client
                .latest_per_pharmacy(&self.patient_id, self.prescription_id.as_deref()),
        )?;

        *self.pharmacies.lock().expect("pharmacies lock") = pharmacies;
        self.apply(BoardEvent::PollCompleted {
            generation,
            orders: latest.into_iter().map(|detail| detail.order).collect(),
        });
        Ok(())
    }

    /// Run the polling loop until the token is cancelled
    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::debug!("order poller stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = self.poll_once().await {
                            // 单次失败只记日志，下个周期重试
                            tracing::warn!(error = %e, "order poll failed");
                        }
                    }
                }
            }
        })
    }
}
