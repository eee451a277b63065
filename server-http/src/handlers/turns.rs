use super::{respond, ApiResult};
use crate::api::{clinic_error, CreateTurnRequest, MessageResponse, UpdateTurnRequest};
use crate::state::AppState;
use crate::validation::{json_body, parse_id, violations_error};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use clinic::booking::Turn;
use clinic::ResourceKind;
use tracing::info;

/// POST /api/v1/turns
///
/// Both the patient and the dentist must exist; the patient is checked first.
pub async fn create_turn(
    State(state): State<AppState>,
    body: Result<Json<CreateTurnRequest>, JsonRejection>,
) -> ApiResult<Turn> {
    let turn = json_body(body)?
        .into_new_turn()
        .map_err(|violations| violations_error(&violations))?;

    info!(
        "CREATE_TURN: patient={}, dentist={}",
        turn.patient_id, turn.dentist_id
    );

    let turn = state.booking.create(turn).await.map_err(clinic_error)?;
    respond(StatusCode::CREATED, turn)
}

/// GET /api/v1/turns/{id}
pub async fn get_turn(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Turn> {
    let id = parse_id(&id)?;
    let turn = state.booking.get_by_id(id).await.map_err(clinic_error)?;
    respond(StatusCode::OK, turn)
}

/// GET /api/v1/turns/patient/{id}
pub async fn get_turns_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Vec<Turn>> {
    let patient_id = parse_id(&patient_id)?;
    let turns = state
        .booking
        .get_by_patient_id(patient_id)
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::OK, turns)
}

/// PUT /api/v1/turns/{id}
pub async fn update_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTurnRequest>, JsonRejection>,
) -> ApiResult<Turn> {
    let id = parse_id(&id)?;
    let update = json_body(body)?
        .into_turn_update()
        .map_err(|violations| violations_error(&violations))?;

    info!("UPDATE_TURN: id={}, dentist={}", id, update.dentist_id);

    let turn = state.booking.update(id, update).await.map_err(clinic_error)?;
    respond(StatusCode::OK, turn)
}

/// DELETE /api/v1/turns/{id}
pub async fn delete_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = parse_id(&id)?;

    info!("DELETE_TURN: id={}", id);

    state.booking.delete(id).await.map_err(clinic_error)?;
    respond(StatusCode::OK, MessageResponse::deleted(ResourceKind::Turn))
}
