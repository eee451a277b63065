use crate::validation::{require_id, require_text, FieldViolation, Validate, Violation};
use chrono::{DateTime, Utc};
use clinic::auth::NewUser;
use clinic::booking::{NewTurn, TurnUpdate};
use clinic::directory::{DentistPatch, NewDentist, NewPatient, PatientPatch};
use serde::{Deserialize, Serialize};

// Missing fields deserialize as empty so validation can name them.

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "name", &self.name);
        require_text(&mut violations, "surname", &self.surname);
        require_text(&mut violations, "email", &self.email);
        require_text(&mut violations, "password", &self.password);
        violations
    }
}

impl From<SignupRequest> for NewUser {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "email", &self.email);
        require_text(&mut violations, "password", &self.password);
        violations
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PatientRequest {
    pub name: String,
    #[serde(rename = "lastname", alias = "last_name")]
    pub last_name: String,
    pub address: String,
    pub dni: String,
}

impl Validate for PatientRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "name", &self.name);
        require_text(&mut violations, "lastname", &self.last_name);
        require_text(&mut violations, "address", &self.address);
        require_text(&mut violations, "dni", &self.dni);
        violations
    }
}

impl From<PatientRequest> for NewPatient {
    fn from(req: PatientRequest) -> Self {
        Self {
            name: req.name,
            last_name: req.last_name,
            address: req.address,
            dni: req.dni,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PatientPatchRequest {
    pub name: Option<String>,
    #[serde(rename = "lastname", alias = "last_name")]
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub dni: Option<String>,
}

impl From<PatientPatchRequest> for PatientPatch {
    fn from(req: PatientPatchRequest) -> Self {
        Self {
            name: req.name,
            last_name: req.last_name,
            address: req.address,
            dni: req.dni,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DentistRequest {
    pub name: String,
    #[serde(rename = "lastname", alias = "surname", alias = "last_name")]
    pub last_name: String,
    pub registry: String,
}

impl Validate for DentistRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "name", &self.name);
        require_text(&mut violations, "lastname", &self.last_name);
        require_text(&mut violations, "registry", &self.registry);
        violations
    }
}

impl From<DentistRequest> for NewDentist {
    fn from(req: DentistRequest) -> Self {
        Self {
            name: req.name,
            last_name: req.last_name,
            registry: req.registry,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DentistPatchRequest {
    pub name: Option<String>,
    #[serde(rename = "lastname", alias = "surname", alias = "last_name")]
    pub last_name: Option<String>,
    pub registry: Option<String>,
}

impl From<DentistPatchRequest> for DentistPatch {
    fn from(req: DentistPatchRequest) -> Self {
        Self {
            name: req.name,
            last_name: req.last_name,
            registry: req.registry,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateTurnRequest {
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    #[serde(rename = "id_patient")]
    pub patient_id: u64,
    #[serde(rename = "id_dentist")]
    pub dentist_id: u64,
}

impl Validate for CreateTurnRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.date.is_none() {
            violations.push(FieldViolation {
                field: "date",
                violation: Violation::Empty,
            });
        }
        require_text(&mut violations, "description", &self.description);
        require_id(&mut violations, "id_patient", self.patient_id);
        require_id(&mut violations, "id_dentist", self.dentist_id);
        violations
    }
}

impl CreateTurnRequest {
    pub fn into_new_turn(self) -> Result<NewTurn, Vec<FieldViolation>> {
        let violations = self.validate();
        match self.date {
            Some(date) if violations.is_empty() => Ok(NewTurn {
                date,
                description: self.description,
                patient_id: self.patient_id,
                dentist_id: self.dentist_id,
            }),
            _ => Err(violations),
        }
    }
}

/// Body of a turn update. A patient id in the body is ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdateTurnRequest {
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    #[serde(rename = "id_dentist")]
    pub dentist_id: u64,
}

impl Validate for UpdateTurnRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.date.is_none() {
            violations.push(FieldViolation {
                field: "date",
                violation: Violation::Empty,
            });
        }
        require_text(&mut violations, "description", &self.description);
        require_id(&mut violations, "id_dentist", self.dentist_id);
        violations
    }
}

impl UpdateTurnRequest {
    pub fn into_turn_update(self) -> Result<TurnUpdate, Vec<FieldViolation>> {
        let violations = self.validate();
        match self.date {
            Some(date) if violations.is_empty() => Ok(TurnUpdate {
                date,
                description: self.description,
                dentist_id: self.dentist_id,
            }),
            _ => Err(violations),
        }
    }
}
