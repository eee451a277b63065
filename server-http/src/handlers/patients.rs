use super::{respond, ApiResult};
use crate::api::{clinic_error, MessageResponse, PatientPatchRequest, PatientRequest};
use crate::state::AppState;
use crate::validation::{json_body, parse_id, validated};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use clinic::directory::Patient;
use clinic::ResourceKind;
use tracing::info;

/// POST /api/v1/patients
pub async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<PatientRequest>, JsonRejection>,
) -> ApiResult<Patient> {
    let req = validated(json_body(body)?)?;

    info!("CREATE_PATIENT: dni={}", req.dni);

    let patient = state
        .patients
        .create(req.into())
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::CREATED, patient)
}

/// GET /api/v1/patients/{id}
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Patient> {
    let id = parse_id(&id)?;
    let patient = state.patients.get_by_id(id).await.map_err(clinic_error)?;
    respond(StatusCode::OK, patient)
}

/// PUT /api/v1/patients/{id}
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PatientRequest>, JsonRejection>,
) -> ApiResult<Patient> {
    let id = parse_id(&id)?;
    let req = validated(json_body(body)?)?;

    info!("UPDATE_PATIENT: id={}", id);

    let patient = state
        .patients
        .update(id, req.into())
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::OK, patient)
}

/// PATCH /api/v1/patients/{id}
///
/// Only non-empty fields in the body are applied.
pub async fn patch_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PatientPatchRequest>, JsonRejection>,
) -> ApiResult<Patient> {
    let id = parse_id(&id)?;
    let req = json_body(body)?;

    info!("PATCH_PATIENT: id={}", id);

    let patient = state
        .patients
        .patch(id, req.into())
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::OK, patient)
}

/// DELETE /api/v1/patients/{id}
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = parse_id(&id)?;

    info!("DELETE_PATIENT: id={}", id);

    state.patients.delete(id).await.map_err(clinic_error)?;
    respond(StatusCode::OK, MessageResponse::deleted(ResourceKind::Patient))
}
