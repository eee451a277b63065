use super::models::{Dentist, DentistPatch, NewDentist};
use super::repository::DentistRepository;
use crate::error::{ClinicError, ResourceKind};
use std::sync::Arc;
use tracing::info;

pub struct DentistService {
    repo: Arc<dyn DentistRepository>,
}

impl DentistService {
    pub fn new(repo: Arc<dyn DentistRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, details: NewDentist) -> Result<Dentist, ClinicError> {
        let dentist = self.repo.create(details).await?;
        info!("Registered dentist {} ({})", dentist.id, dentist.registry);
        Ok(dentist)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Dentist, ClinicError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ClinicError::NotFound(ResourceKind::Dentist))
    }

    pub async fn update(&self, id: u64, details: NewDentist) -> Result<Dentist, ClinicError> {
        let mut dentist = self.get_by_id(id).await?;
        dentist.replace(details);
        self.repo.update(dentist).await
    }

    pub async fn patch(&self, id: u64, patch: DentistPatch) -> Result<Dentist, ClinicError> {
        let mut dentist = self.get_by_id(id).await?;
        dentist.apply(patch);
        self.repo.update(dentist).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClinicError> {
        if !self.repo.delete(id).await? {
            return Err(ClinicError::NotFound(ResourceKind::Dentist));
        }
        info!("Deleted dentist {}", id);
        Ok(())
    }
}
