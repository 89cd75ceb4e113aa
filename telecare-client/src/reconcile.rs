//! Order board reconciliation
//!
//! 每家药房一个槽位的本地视图。所有状态变化都经过 [`OrderBoard::apply`]
//! 这个纯 reducer，而不是各处随手改 map：
//!
//! - 下单先写乐观占位槽 (`PendingOptimistic`)
//! - 请求成功 → 服务器记录替换占位；失败 → 翻为 `Failed`
//! - 409 冲突 → 采纳服务器返回的已有订单
//! - 轮询快照带世代号：不比上次新的快照整体丢弃，迟到的旧响应
//!   永远覆盖不了新状态

use std::collections::HashMap;

use shared::models::Order;

/// State of one pharmacy's slot
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSlot {
    /// Optimistic placeholder: the create request is still in flight
    PendingOptimistic {
        /// Prescription the placeholder was written for
        prescription_id: String,
    },
    /// Server-confirmed order
    Synced(Order),
    /// The create failed; kept so the UI can surface the alert
    Failed { message: String },
}

/// Events driving the board
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// User pressed "place order"; write the placeholder before the
    /// network call resolves
    PlaceRequested {
        pharmacy_id: String,
        prescription_id: String,
    },
    /// Create resolved with a fresh order
    PlaceSucceeded { pharmacy_id: String, order: Order },
    /// Create resolved with a conflict; the server's existing order wins
    PlaceConflicted { pharmacy_id: String, existing: Order },
    /// Create failed; roll the placeholder back to an error state
    PlaceFailed { pharmacy_id: String, message: String },
    /// A poll cycle finished with this snapshot of latest-per-pharmacy
    PollCompleted { generation: u64, orders: Vec<Order> },
}

/// Local "my orders per pharmacy" view
#[derive(Debug, Default)]
pub struct OrderBoard {
    slots: HashMap<String, OrderSlot>,
    /// Generation of the newest snapshot applied so far
    last_generation: u64,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current slot for a pharmacy (`None` = absent)
    pub fn slot(&self, pharmacy_id: &str) -> Option<&OrderSlot> {
        self.slots.get(pharmacy_id)
    }

    /// Snapshot of all slots, for rendering
    pub fn slots(&self) -> &HashMap<String, OrderSlot> {
        &self.slots
    }

    /// Generation of the last applied poll snapshot
    pub fn last_generation(&self) -> u64 {
        self.last_generation
    }

    /// Apply one event. The only mutation path.
    pub fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::PlaceRequested {
                pharmacy_id,
                prescription_id,
            } => {
                self.slots
                    .insert(pharmacy_id, OrderSlot::PendingOptimistic { prescription_id });
            }

            BoardEvent::PlaceSucceeded { pharmacy_id, order }
            | BoardEvent::PlaceConflicted {
                pharmacy_id,
                existing: order,
            } => {
                self.slots.insert(pharmacy_id, OrderSlot::Synced(order));
            }

            BoardEvent::PlaceFailed {
                pharmacy_id,
                message,
            } => {
                // 只有还在等这单的占位槽才翻错误；迟到的失败回调
                // 不能覆盖已同步的服务器记录
                if matches!(
                    self.slots.get(&pharmacy_id),
                    Some(OrderSlot::PendingOptimistic { .. })
                ) {
                    self.slots.insert(pharmacy_id, OrderSlot::Failed { message });
                }
            }

            BoardEvent::PollCompleted { generation, orders } => {
                if generation <= self.last_generation {
                    tracing::debug!(
                        generation,
                        newest = self.last_generation,
                        "discarding stale poll snapshot"
                    );
                    return;
                }
                self.last_generation = generation;

                for order in orders {
                    let keep_placeholder = !order.status.is_active()
                        && matches!(
                            self.slots.get(&order.pharmacy_id),
                            Some(OrderSlot::PendingOptimistic { .. })
                        );
                    // 快照里的终态订单早于在途的下单请求，
                    // 占位槽由那次请求自己的回调来结算
                    if keep_placeholder {
                        continue;
                    }
                    self.slots
                        .insert(order.pharmacy_id.clone(), OrderSlot::Synced(order));
                }
            }
        }
    }
}
