//! Pharmacy API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pharmacies", routes())
}

fn routes() -> Router<ServerState> {
    // 药房列表是客户端轮询的一半，无需过滤参数
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
}
