//! Patient API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::patient;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Patient, PatientCreate};

/// POST /api/patients - 注册患者
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PatientCreate>,
) -> AppResult<(StatusCode, Json<Patient>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    let created = patient::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/patients/:id - 获取患者
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Patient>> {
    let found = patient::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Patient {} not found", id)))?;
    Ok(Json(found))
}
