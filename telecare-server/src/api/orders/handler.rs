//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::order::{self, CreateOutcome};
use crate::db::repository::{patient, pharmacy, prescription};
use crate::utils::validation::validate_reference;
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderCreate, OrderDetail, OrderStatus, OrderStatusUpdate};
use shared::response::ApiEnvelope;

/// POST /api/orders - 下单
///
/// 复制处方药品快照后插入 pending 订单。三元组上已有活跃订单时返回
/// 409，信封 data 携带已存在的订单 —— 对客户端而言这是“采纳”而非失败。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Response> {
    validate_reference(&payload.patient_id, "patientId")?;
    validate_reference(&payload.pharmacy_id, "pharmacyId")?;
    validate_reference(&payload.prescription_id, "prescriptionId")?;

    if !patient::exists(&state.pool, &payload.patient_id).await? {
        return Err(AppError::not_found(format!(
            "Patient {} not found",
            payload.patient_id
        )));
    }
    if !pharmacy::exists(&state.pool, &payload.pharmacy_id).await? {
        return Err(AppError::not_found(format!(
            "Pharmacy {} not found",
            payload.pharmacy_id
        )));
    }
    let rx = prescription::find_by_id(&state.pool, &payload.prescription_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Prescription {} not found",
                payload.prescription_id
            ))
        })?;

    match order::create(&state.pool, &payload, &rx.medicines).await? {
        CreateOutcome::Created(created) => {
            Ok((StatusCode::CREATED, Json(created)).into_response())
        }
        CreateOutcome::DuplicateActive(existing) => {
            let body = ApiEnvelope::<Order>::error_with_data(
                "E0004",
                "An active order already exists for this prescription and pharmacy",
                existing,
            );
            Ok((StatusCode::CONFLICT, Json(body)).into_response())
        }
    }
}

/// Query params for listing orders
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub patient_id: Option<String>,
    pub prescription_id: Option<String>,
    pub pharmacy_id: Option<String>,
}

/// GET /api/orders?patientId=&prescriptionId=&pharmacyId= - 订单列表 (新 → 旧)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let patient_id = query
        .patient_id
        .as_deref()
        .ok_or_else(|| AppError::validation("patientId is required"))?;
    validate_reference(patient_id, "patientId")?;
    if let Some(rx) = query.prescription_id.as_deref() {
        validate_reference(rx, "prescriptionId")?;
    }
    if let Some(ph) = query.pharmacy_id.as_deref() {
        validate_reference(ph, "pharmacyId")?;
    }

    let orders = order::list(
        &state.pool,
        patient_id,
        query.prescription_id.as_deref(),
        query.pharmacy_id.as_deref(),
    )
    .await?;
    let details = convert::to_order_details(&state.pool, orders).await?;
    Ok(Json(details))
}

/// GET /api/orders/latest?patientId=&prescriptionId= - 每家药房最新订单
pub async fn latest_per_pharmacy(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let patient_id = query
        .patient_id
        .as_deref()
        .ok_or_else(|| AppError::validation("patientId is required"))?;
    validate_reference(patient_id, "patientId")?;
    if let Some(rx) = query.prescription_id.as_deref() {
        validate_reference(rx, "prescriptionId")?;
    }

    let orders =
        order::latest_per_pharmacy(&state.pool, patient_id, query.prescription_id.as_deref())
            .await?;
    let details = convert::to_order_details(&state.pool, orders).await?;
    Ok(Json(details))
}

/// GET /api/orders/:id - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    validate_reference(&id, "orderId")?;
    let found = order::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    let detail = convert::to_order_detail(&state.pool, found).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/:id/status - 药房侧状态流转
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderDetail>> {
    validate_reference(&id, "orderId")?;
    let status = OrderStatus::parse(&payload.status).ok_or_else(|| {
        AppError::validation(format!(
            "status must be one of {:?}, got {:?}",
            OrderStatus::ACCEPTED,
            payload.status
        ))
    })?;

    let updated = order::update_status(&state.pool, &id, status).await?;
    let detail = convert::to_order_detail(&state.pool, updated).await?;
    Ok(Json(detail))
}

/// GET /api/orders/pharmacy/:pharmacy_id/pending - 药房待处理队列
pub async fn pharmacy_pending(
    State(state): State<ServerState>,
    Path(pharmacy_id): Path<String>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    pharmacy_queue(&state, &pharmacy_id, OrderStatus::Pending).await
}

/// GET /api/orders/pharmacy/:pharmacy_id/confirmed - 药房已确认队列
pub async fn pharmacy_confirmed(
    State(state): State<ServerState>,
    Path(pharmacy_id): Path<String>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    pharmacy_queue(&state, &pharmacy_id, OrderStatus::Confirmed).await
}

async fn pharmacy_queue(
    state: &ServerState,
    pharmacy_id: &str,
    status: OrderStatus,
) -> AppResult<Json<Vec<OrderDetail>>> {
    validate_reference(pharmacy_id, "pharmacyId")?;
    if !pharmacy::exists(&state.pool, pharmacy_id).await? {
        return Err(AppError::not_found(format!(
            "Pharmacy {} not found",
            pharmacy_id
        )));
    }

    let orders = order::find_by_pharmacy_and_status(&state.pool, pharmacy_id, status).await?;
    let details = convert::to_order_details(&state.pool, orders).await?;
    Ok(Json(details))
}
