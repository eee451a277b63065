use super::models::{NewPatient, Patient, PatientPatch};
use super::repository::PatientRepository;
use crate::error::{ClinicError, ResourceKind};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(repo: Arc<dyn PatientRepository>) -> Self {
        Self { repo }
    }

    /// Register a patient, stamping the registration time
    pub async fn create(&self, details: NewPatient) -> Result<Patient, ClinicError> {
        let patient = self.repo.create(details, Utc::now()).await?;
        info!("Registered patient {}", patient.id);
        Ok(patient)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Patient, ClinicError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ClinicError::NotFound(ResourceKind::Patient))
    }

    pub async fn update(&self, id: u64, details: NewPatient) -> Result<Patient, ClinicError> {
        let mut patient = self.get_by_id(id).await?;
        patient.replace(details);
        self.repo.update(patient).await
    }

    pub async fn patch(&self, id: u64, patch: PatientPatch) -> Result<Patient, ClinicError> {
        let mut patient = self.get_by_id(id).await?;
        patient.apply(patch);
        self.repo.update(patient).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClinicError> {
        if !self.repo.delete(id).await? {
            return Err(ClinicError::NotFound(ResourceKind::Patient));
        }
        info!("Deleted patient {}", id);
        Ok(())
    }
}
