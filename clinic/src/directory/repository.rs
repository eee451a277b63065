use super::models::{Dentist, NewDentist, NewPatient, Patient};
use crate::error::ClinicError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Assign the next id and persist
    async fn create(
        &self,
        patient: NewPatient,
        registered_at: DateTime<Utc>,
    ) -> Result<Patient, ClinicError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Patient>, ClinicError>;

    /// Overwrite an existing patient
    async fn update(&self, patient: Patient) -> Result<Patient, ClinicError>;

    /// Returns false when nothing was removed
    async fn delete(&self, id: u64) -> Result<bool, ClinicError>;
}

#[async_trait]
pub trait DentistRepository: Send + Sync {
    /// Assign the next id and persist
    async fn create(&self, dentist: NewDentist) -> Result<Dentist, ClinicError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Dentist>, ClinicError>;

    /// Overwrite an existing dentist
    async fn update(&self, dentist: Dentist) -> Result<Dentist, ClinicError>;

    /// Returns false when nothing was removed
    async fn delete(&self, id: u64) -> Result<bool, ClinicError>;
}
