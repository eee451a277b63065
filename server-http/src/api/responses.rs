use axum::{http::StatusCode, Json};
use clinic::auth::User;
use clinic::{ClinicError, ResourceKind};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Envelope for every successful response except login.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(status, message)))
}

/// Map a domain error onto a status code and a message safe to show callers.
pub fn clinic_error(err: ClinicError) -> ApiError {
    if err.is_internal() {
        error!("Request failed: {}", err);
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE);
    }

    match err {
        ClinicError::Validation(message) => api_error(StatusCode::BAD_REQUEST, message),
        ClinicError::NotFound(kind) => api_error(StatusCode::NOT_FOUND, format!("{} not found", kind)),
        ClinicError::AlreadyExists(kind) => {
            api_error(StatusCode::CONFLICT, format!("{} already exists", kind))
        }
        ClinicError::InvalidCredentials => api_error(StatusCode::FORBIDDEN, "invalid credentials"),
        ClinicError::Unauthorized(message) => api_error(StatusCode::FORBIDDEN, message),
        ClinicError::Storage(_)
        | ClinicError::Serialization(_)
        | ClinicError::PasswordHash(_)
        | ClinicError::Token(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(kind: ResourceKind) -> Self {
        Self {
            message: format!("{} deleted", kind),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_are_masked() {
        let (status, Json(body)) = clinic_error(ClinicError::Storage("disk on fire".into()));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, 500);
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ClinicError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ClinicError::NotFound(ResourceKind::Turn), StatusCode::NOT_FOUND),
            (ClinicError::AlreadyExists(ResourceKind::User), StatusCode::CONFLICT),
            (ClinicError::InvalidCredentials, StatusCode::FORBIDDEN),
            (ClinicError::Unauthorized("nope".into()), StatusCode::FORBIDDEN),
            (ClinicError::PasswordHash("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ClinicError::Token("bad key".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(clinic_error(err).0, expected);
        }
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let (_, Json(body)) = clinic_error(ClinicError::NotFound(ResourceKind::Dentist));
        assert_eq!(body.message, "dentist not found");
    }

    #[test]
    fn test_user_response_omits_hash() {
        let user = User::new(
            "Ana".into(),
            "Diaz".into(),
            "ana@clinic.io".into(),
            "$argon2id$secret".into(),
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ana@clinic.io");
    }
}
