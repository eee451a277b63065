use crate::directory::{Dentist, Patient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A turn as stored: references to patient and dentist by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnRecord {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub patient_id: u64,
    pub dentist_id: u64,
    pub created_at: DateTime<Utc>,
}

impl TurnRecord {
    pub fn new(id: u64, turn: NewTurn, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            date: turn.date,
            description: turn.description,
            patient_id: turn.patient_id,
            dentist_id: turn.dentist_id,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTurn {
    pub date: DateTime<Utc>,
    pub description: String,
    pub patient_id: u64,
    pub dentist_id: u64,
}

/// Fields a turn update may change. The patient stays fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnUpdate {
    pub date: DateTime<Utc>,
    pub description: String,
    pub dentist_id: u64,
}

/// A turn joined with the patient and dentist as they are stored at read time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Turn {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub patient: Patient,
    pub dentist: Dentist,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn compose(record: TurnRecord, patient: Patient, dentist: Dentist) -> Self {
        Self {
            id: record.id,
            date: record.date,
            description: record.description,
            patient,
            dentist,
            created_at: record.created_at,
        }
    }
}
