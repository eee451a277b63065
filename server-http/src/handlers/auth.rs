use super::{respond, ApiResult};
use crate::api::{
    api_error, clinic_error, ApiError, LoginRequest, LoginResponse, SignupRequest, UserResponse,
};
use crate::state::AppState;
use crate::validation::{json_body, validated};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use clinic::{ClinicError, ResourceKind};
use tracing::{error, info};

/// POST /api/v1/auth/signup
///
/// Register an account from `{name, surname, email, password}`. The stored
/// password is an Argon2 hash and is never returned.
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let req = validated(json_body(body)?)?;
    let email = req.email.clone();

    info!("SIGNUP: email={}", email);

    match state.identity.signup(req.into()).await {
        Ok(user) => respond(StatusCode::CREATED, user.into()),
        Err(ClinicError::AlreadyExists(ResourceKind::User)) => Err(api_error(
            StatusCode::CONFLICT,
            format!("user with email {} already exists", email),
        )),
        Err(e) => {
            error!("Failed to register {}: {}", email, e);
            Err(clinic_error(e))
        }
    }
}

/// POST /api/v1/auth/login
///
/// Exchange `{email, password}` for `{access_token}`. The token is valid for
/// fifteen minutes and is sent back as `Authorization: Bearer <token>`.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let req = validated(json_body(body)?)?;

    match state.identity.login(&req.email, &req.password).await {
        Ok(access_token) => {
            info!("LOGIN: email={}", req.email);
            Ok(Json(LoginResponse { access_token }))
        }
        Err(ClinicError::NotFound(ResourceKind::User)) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("user with email {} does not exist", req.email),
        )),
        Err(e) => Err(clinic_error(e)),
    }
}
