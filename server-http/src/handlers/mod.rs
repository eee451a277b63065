pub mod auth;
pub mod dentists;
pub mod health;
pub mod patients;
pub mod turns;

use crate::api::{ApiError, SuccessResponse};
use axum::{http::StatusCode, Json};

/// Result of every enveloped handler.
pub type ApiResult<T> = Result<(StatusCode, Json<SuccessResponse<T>>), ApiError>;

fn respond<T>(status: StatusCode, data: T) -> ApiResult<T> {
    Ok((status, Json(SuccessResponse::new(status, data))))
}

pub use auth::{login, signup};
pub use dentists::{create_dentist, delete_dentist, get_dentist, patch_dentist, update_dentist};
pub use health::health_check;
pub use patients::{create_patient, delete_patient, get_patient, patch_patient, update_patient};
pub use turns::{create_turn, delete_turn, get_turn, get_turns_by_patient, update_turn};
