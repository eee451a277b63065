use crate::api::{api_error, ApiError};
use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use std::fmt;
use tracing::warn;

pub const INVALID_ID_MESSAGE: &str = "invalid id";
pub const INVALID_JSON_MESSAGE: &str = "invalid JSON body";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Empty,
    NotPositive,
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub violation: Violation,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            Violation::Empty => write!(f, "field {} cannot be empty", self.field),
            Violation::NotPositive => write!(f, "field {} must be a positive id", self.field),
        }
    }
}

/// Field checks for a request body. An empty list means the body is acceptable.
pub trait Validate {
    fn validate(&self) -> Vec<FieldViolation>;
}

pub fn require_text(violations: &mut Vec<FieldViolation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        violations.push(FieldViolation {
            field,
            violation: Violation::Empty,
        });
    }
}

pub fn require_id(violations: &mut Vec<FieldViolation>, field: &'static str, value: u64) {
    if value == 0 {
        violations.push(FieldViolation {
            field,
            violation: Violation::NotPositive,
        });
    }
}

pub fn violations_error(violations: &[FieldViolation]) -> ApiError {
    let message = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    api_error(StatusCode::BAD_REQUEST, message)
}

pub fn validated<T: Validate>(request: T) -> Result<T, ApiError> {
    let violations = request.validate();
    if violations.is_empty() {
        Ok(request)
    } else {
        Err(violations_error(&violations))
    }
}

/// Unwrap a JSON body, turning any extractor rejection into a 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(api_error(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE))
        }
    }
}

/// Path ids must be positive integers.
pub fn parse_id(raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(api_error(StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        name: String,
        owner: u64,
    }

    impl Validate for Probe {
        fn validate(&self) -> Vec<FieldViolation> {
            let mut violations = Vec::new();
            require_text(&mut violations, "name", &self.name);
            require_id(&mut violations, "owner", self.owner);
            violations
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_invalid_id_message() {
        let (status, Json(body)) = parse_id("x").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, INVALID_ID_MESSAGE);
    }

    #[test]
    fn test_violations_are_all_reported() {
        let probe = Probe {
            name: "  ".into(),
            owner: 0,
        };

        let (status, Json(body)) = validated(probe).err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.message,
            "field name cannot be empty; field owner must be a positive id"
        );
    }

    #[test]
    fn test_valid_request_passes_through() {
        let probe = Probe {
            name: "ok".into(),
            owner: 4,
        };
        assert!(validated(probe).is_ok());
    }
}
