use super::{respond, ApiResult};
use crate::api::{clinic_error, DentistPatchRequest, DentistRequest, MessageResponse};
use crate::state::AppState;
use crate::validation::{json_body, parse_id, validated};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use clinic::directory::Dentist;
use clinic::ResourceKind;
use tracing::info;

/// POST /api/v1/dentists
pub async fn create_dentist(
    State(state): State<AppState>,
    body: Result<Json<DentistRequest>, JsonRejection>,
) -> ApiResult<Dentist> {
    let req = validated(json_body(body)?)?;

    info!("CREATE_DENTIST: registry={}", req.registry);

    let dentist = state
        .dentists
        .create(req.into())
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::CREATED, dentist)
}

/// GET /api/v1/dentists/{id}
pub async fn get_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Dentist> {
    let id = parse_id(&id)?;
    let dentist = state.dentists.get_by_id(id).await.map_err(clinic_error)?;
    respond(StatusCode::OK, dentist)
}

/// PUT /api/v1/dentists/{id}
pub async fn update_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DentistRequest>, JsonRejection>,
) -> ApiResult<Dentist> {
    let id = parse_id(&id)?;
    let req = validated(json_body(body)?)?;

    info!("UPDATE_DENTIST: id={}", id);

    let dentist = state
        .dentists
        .update(id, req.into())
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::OK, dentist)
}

/// PATCH /api/v1/dentists/{id}
pub async fn patch_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DentistPatchRequest>, JsonRejection>,
) -> ApiResult<Dentist> {
    let id = parse_id(&id)?;
    let req = json_body(body)?;

    info!("PATCH_DENTIST: id={}", id);

    let dentist = state
        .dentists
        .patch(id, req.into())
        .await
        .map_err(clinic_error)?;
    respond(StatusCode::OK, dentist)
}

/// DELETE /api/v1/dentists/{id}
pub async fn delete_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = parse_id(&id)?;

    info!("DELETE_DENTIST: id={}", id);

    state.dentists.delete(id).await.map_err(clinic_error)?;
    respond(StatusCode::OK, MessageResponse::deleted(ResourceKind::Dentist))
}
