//! Pharmacy API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::pharmacy;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Pharmacy, PharmacyCreate};

/// GET /api/pharmacies - 获取所有药房
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Pharmacy>>> {
    let pharmacies = pharmacy::find_all(&state.pool).await?;
    Ok(Json(pharmacies))
}

/// POST /api/pharmacies - 创建药房
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PharmacyCreate>,
) -> AppResult<(StatusCode, Json<Pharmacy>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_PHONE_LEN)?;

    let created = pharmacy::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/pharmacies/:id - 获取单个药房
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Pharmacy>> {
    let found = pharmacy::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Pharmacy {} not found", id)))?;
    Ok(Json(found))
}
