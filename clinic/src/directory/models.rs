use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub address: String,
    pub dni: String,
    #[serde(rename = "dateup")]
    pub registered_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(id: u64, details: NewPatient, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: details.name,
            last_name: details.last_name,
            address: details.address,
            dni: details.dni,
            registered_at,
        }
    }

    /// Replace every editable field, keeping id and registration time.
    pub fn replace(&mut self, details: NewPatient) {
        self.name = details.name;
        self.last_name = details.last_name;
        self.address = details.address;
        self.dni = details.dni;
    }

    pub fn apply(&mut self, patch: PatientPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.last_name, patch.last_name);
        merge(&mut self.address, patch.address);
        merge(&mut self.dni, patch.dni);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub last_name: String,
    pub address: String,
    pub dni: String,
}

/// Partial update. Absent or empty fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub dni: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dentist {
    pub id: u64,
    pub name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub registry: String,
}

impl Dentist {
    pub fn new(id: u64, details: NewDentist) -> Self {
        Self {
            id,
            name: details.name,
            last_name: details.last_name,
            registry: details.registry,
        }
    }

    pub fn replace(&mut self, details: NewDentist) {
        self.name = details.name;
        self.last_name = details.last_name;
        self.registry = details.registry;
    }

    pub fn apply(&mut self, patch: DentistPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.last_name, patch.last_name);
        merge(&mut self.registry, patch.registry);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDentist {
    pub name: String,
    pub last_name: String,
    pub registry: String,
}

#[derive(Debug, Clone, Default)]
pub struct DentistPatch {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub registry: Option<String>,
}

fn merge(field: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *field = value;
    }
}
