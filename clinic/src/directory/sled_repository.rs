use super::models::{Dentist, NewDentist, NewPatient, Patient};
use super::repository::{DentistRepository, PatientRepository};
use crate::error::{ClinicError, ResourceKind};
use crate::persistence::{SledStore, get_json, id_key, insert_new, replace_existing};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const PATIENTS_TREE: &str = "patients";
const DENTISTS_TREE: &str = "dentists";

#[derive(Clone)]
pub struct SledPatientRepository {
    store: SledStore,
}

impl SledPatientRepository {
    pub fn new(store: SledStore) -> Self {
        Self { store }
    }

    fn patients_tree(&self) -> Result<sled::Tree, ClinicError> {
        self.store.tree(PATIENTS_TREE)
    }
}

#[async_trait]
impl PatientRepository for SledPatientRepository {
    async fn create(
        &self,
        patient: NewPatient,
        registered_at: DateTime<Utc>,
    ) -> Result<Patient, ClinicError> {
        let id = self.store.next_id(PATIENTS_TREE)?;
        let patient = Patient::new(id, patient, registered_at);

        insert_new(
            &self.patients_tree()?,
            id_key(id),
            &patient,
            ResourceKind::Patient,
        )?;

        Ok(patient)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Patient>, ClinicError> {
        get_json(&self.patients_tree()?, id_key(id))
    }

    async fn update(&self, patient: Patient) -> Result<Patient, ClinicError> {
        replace_existing(
            &self.patients_tree()?,
            id_key(patient.id),
            &patient,
            ResourceKind::Patient,
        )?;
        Ok(patient)
    }

    async fn delete(&self, id: u64) -> Result<bool, ClinicError> {
        Ok(self.patients_tree()?.remove(id_key(id))?.is_some())
    }
}

#[derive(Clone)]
pub struct SledDentistRepository {
    store: SledStore,
}

impl SledDentistRepository {
    pub fn new(store: SledStore) -> Self {
        Self { store }
    }

    fn dentists_tree(&self) -> Result<sled::Tree, ClinicError> {
        self.store.tree(DENTISTS_TREE)
    }
}

#[async_trait]
impl DentistRepository for SledDentistRepository {
    async fn create(&self, dentist: NewDentist) -> Result<Dentist, ClinicError> {
        let id = self.store.next_id(DENTISTS_TREE)?;
        let dentist = Dentist::new(id, dentist);

        insert_new(
            &self.dentists_tree()?,
            id_key(id),
            &dentist,
            ResourceKind::Dentist,
        )?;

        Ok(dentist)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Dentist>, ClinicError> {
        get_json(&self.dentists_tree()?, id_key(id))
    }

    async fn update(&self, dentist: Dentist) -> Result<Dentist, ClinicError> {
        replace_existing(
            &self.dentists_tree()?,
            id_key(dentist.id),
            &dentist,
            ResourceKind::Dentist,
        )?;
        Ok(dentist)
    }

    async fn delete(&self, id: u64) -> Result<bool, ClinicError> {
        Ok(self.dentists_tree()?.remove(id_key(id))?.is_some())
    }
}
