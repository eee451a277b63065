use std::fmt;
use thiserror::Error;

/// The record type an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Patient,
    Dentist,
    Turn,
    User,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
            ResourceKind::Dentist => "dentist",
            ResourceKind::Turn => "turn",
            ResourceKind::User => "user",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ClinicError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(ResourceKind),

    #[error("{0} already exists")]
    AlreadyExists(ResourceKind),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl ClinicError {
    /// Storage-class failures are never shown to callers verbatim.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ClinicError::Storage(_)
                | ClinicError::Serialization(_)
                | ClinicError::PasswordHash(_)
                | ClinicError::Token(_)
        )
    }
}

impl From<sled::Error> for ClinicError {
    fn from(err: sled::Error) -> Self {
        ClinicError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(err: serde_json::Error) -> Self {
        ClinicError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClinicError>;
