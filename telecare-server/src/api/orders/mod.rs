//! Order API Module
//!
//! 下单、状态流转与查询。活跃订单在 (patient, pharmacy, prescription)
//! 三元组上唯一；重复下单返回 409 并携带已存在的订单。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Latest order per pharmacy (must be before /{id})
        .route("/latest", get(handler::latest_per_pharmacy))
        // Pharmacy-side queues
        .route("/pharmacy/{pharmacy_id}/pending", get(handler::pharmacy_pending))
        .route("/pharmacy/{pharmacy_id}/confirmed", get(handler::pharmacy_confirmed))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
