//! Prescription API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{patient, prescription};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_reference,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Prescription, PrescriptionCreate};

/// POST /api/prescriptions - 开具处方
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PrescriptionCreate>,
) -> AppResult<(StatusCode, Json<Prescription>)> {
    validate_reference(&payload.patient_id, "patientId")?;
    validate_required_text(&payload.doctor_name, "doctorName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    if payload.medicines.is_empty() {
        return Err(AppError::validation("medicines must not be empty"));
    }
    for m in &payload.medicines {
        validate_required_text(&m.name, "medicine name", MAX_NAME_LEN)?;
        if m.quantity <= 0 {
            return Err(AppError::validation("medicine quantity must be positive"));
        }
    }

    if !patient::exists(&state.pool, &payload.patient_id).await? {
        return Err(AppError::not_found(format!(
            "Patient {} not found",
            payload.patient_id
        )));
    }

    let created = prescription::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Query params for listing prescriptions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub patient_id: Option<String>,
}

/// GET /api/prescriptions?patientId= - 患者处方列表 (新 → 旧)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Prescription>>> {
    let patient_id = query
        .patient_id
        .as_deref()
        .ok_or_else(|| AppError::validation("patientId is required"))?;
    validate_reference(patient_id, "patientId")?;

    let prescriptions = prescription::find_by_patient(&state.pool, patient_id).await?;
    Ok(Json(prescriptions))
}

/// GET /api/prescriptions/:id - 获取处方
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Prescription>> {
    let found = prescription::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Prescription {} not found", id)))?;
    Ok(Json(found))
}
