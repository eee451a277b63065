use super::models::{NewTurn, Turn, TurnRecord, TurnUpdate};
use super::repository::TurnRepository;
use crate::directory::{Dentist, DentistRepository, Patient, PatientRepository};
use crate::error::{ClinicError, ResourceKind};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Turn bookings. Patient and dentist references are checked here, not by the store.
///
/// The existence checks and the write are separate operations: a patient or
/// dentist deleted between the two leaves a turn pointing at nothing. Reads
/// treat such a turn as missing.
pub struct BookingService {
    turns: Arc<dyn TurnRepository>,
    patients: Arc<dyn PatientRepository>,
    dentists: Arc<dyn DentistRepository>,
}

impl BookingService {
    pub fn new(
        turns: Arc<dyn TurnRepository>,
        patients: Arc<dyn PatientRepository>,
        dentists: Arc<dyn DentistRepository>,
    ) -> Self {
        Self {
            turns,
            patients,
            dentists,
        }
    }

    /// Book a turn. The patient is checked before the dentist.
    pub async fn create(&self, turn: NewTurn) -> Result<Turn, ClinicError> {
        let patient = self.require_patient(turn.patient_id).await?;
        let dentist = self.require_dentist(turn.dentist_id).await?;

        let record = self.turns.create(turn, Utc::now()).await?;
        info!(
            "Booked turn {} for patient {} with dentist {}",
            record.id, record.patient_id, record.dentist_id
        );

        Ok(Turn::compose(record, patient, dentist))
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Turn, ClinicError> {
        let record = self.require_turn(id).await?;
        let patient = self.patients.find_by_id(record.patient_id).await?;
        let dentist = self.dentists.find_by_id(record.dentist_id).await?;

        match (patient, dentist) {
            (Some(patient), Some(dentist)) => Ok(Turn::compose(record, patient, dentist)),
            _ => {
                warn!("Turn {} references a removed patient or dentist", id);
                Err(ClinicError::NotFound(ResourceKind::Turn))
            }
        }
    }

    /// All turns of a patient in booking order. Empty when the patient has none.
    pub async fn get_by_patient_id(&self, patient_id: u64) -> Result<Vec<Turn>, ClinicError> {
        let patient = self.require_patient(patient_id).await?;
        let records = self.turns.find_by_patient(patient_id).await?;

        let mut turns = Vec::with_capacity(records.len());
        for record in records {
            match self.dentists.find_by_id(record.dentist_id).await? {
                Some(dentist) => turns.push(Turn::compose(record, patient.clone(), dentist)),
                None => warn!(
                    "Skipping turn {}: dentist {} no longer exists",
                    record.id, record.dentist_id
                ),
            }
        }

        Ok(turns)
    }

    /// Change date, description and dentist. The patient is never changed.
    pub async fn update(&self, id: u64, update: TurnUpdate) -> Result<Turn, ClinicError> {
        let mut record = self.require_turn(id).await?;
        let Some(patient) = self.patients.find_by_id(record.patient_id).await? else {
            warn!("Turn {} references a removed patient", id);
            return Err(ClinicError::NotFound(ResourceKind::Turn));
        };
        let dentist = self.require_dentist(update.dentist_id).await?;

        record.date = update.date;
        record.description = update.description;
        record.dentist_id = update.dentist_id;

        let record = self.turns.update(record).await?;
        info!("Updated turn {}", id);
        Ok(Turn::compose(record, patient, dentist))
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClinicError> {
        if !self.turns.delete(id).await? {
            return Err(ClinicError::NotFound(ResourceKind::Turn));
        }
        info!("Deleted turn {}", id);
        Ok(())
    }

    async fn require_turn(&self, id: u64) -> Result<TurnRecord, ClinicError> {
        self.turns
            .find_by_id(id)
            .await?
            .ok_or(ClinicError::NotFound(ResourceKind::Turn))
    }

    async fn require_patient(&self, id: u64) -> Result<Patient, ClinicError> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or(ClinicError::NotFound(ResourceKind::Patient))
    }

    async fn require_dentist(&self, id: u64) -> Result<Dentist, ClinicError> {
        self.dentists
            .find_by_id(id)
            .await?
            .ok_or(ClinicError::NotFound(ResourceKind::Dentist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::sled_repository::SledTurnRepository;
    use crate::directory::{
        NewDentist, NewPatient, SledDentistRepository, SledPatientRepository,
    };
    use crate::persistence::SledStore;
    use chrono::{DateTime, TimeZone};
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        booking: BookingService,
        patients: Arc<dyn PatientRepository>,
        dentists: Arc<dyn DentistRepository>,
        turns: Arc<dyn TurnRepository>,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let store = SledStore::open(temp_dir.path().join("clinic.sled")).unwrap();
        let patients =
            Arc::new(SledPatientRepository::new(store.clone())) as Arc<dyn PatientRepository>;
        let dentists =
            Arc::new(SledDentistRepository::new(store.clone())) as Arc<dyn DentistRepository>;
        let turns = Arc::new(SledTurnRepository::new(store)) as Arc<dyn TurnRepository>;

        Fixture {
            _temp_dir: temp_dir,
            booking: BookingService::new(turns.clone(), patients.clone(), dentists.clone()),
            patients,
            dentists,
            turns,
        }
    }

    fn new_year_morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    async fn add_patient(fx: &Fixture, name: &str, dni: &str) -> Patient {
        fx.patients
            .create(
                NewPatient {
                    name: name.into(),
                    last_name: "Diaz".into(),
                    address: "Calle 1".into(),
                    dni: dni.into(),
                },
                Utc::now(),
            )
            .await
            .unwrap()
    }

    async fn add_dentist(fx: &Fixture, name: &str, registry: &str) -> Dentist {
        fx.dentists
            .create(NewDentist {
                name: name.into(),
                last_name: "Smith".into(),
                registry: registry.into(),
            })
            .await
            .unwrap()
    }

    fn checkup(patient_id: u64, dentist_id: u64) -> NewTurn {
        NewTurn {
            date: new_year_morning(),
            description: "checkup".into(),
            patient_id,
            dentist_id,
        }
    }

    #[tokio::test]
    async fn test_create_with_existing_references() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let dentist = add_dentist(&fx, "Bob", "R1").await;

        let turn = fx
            .booking
            .create(checkup(patient.id, dentist.id))
            .await
            .unwrap();

        assert_eq!(turn.id, 1);
        assert_eq!(turn.patient.id, patient.id);
        assert_eq!(turn.dentist.id, dentist.id);
        assert_eq!(turn.date, new_year_morning());
        assert_eq!(turn.description, "checkup");
    }

    #[tokio::test]
    async fn test_create_missing_patient_persists_nothing() {
        let fx = fixture();
        let dentist = add_dentist(&fx, "Bob", "R1").await;

        let result = fx.booking.create(checkup(99, dentist.id)).await;

        assert!(matches!(
            result,
            Err(ClinicError::NotFound(ResourceKind::Patient))
        ));
        assert!(fx.turns.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_missing_dentist() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;

        let result = fx.booking.create(checkup(patient.id, 42)).await;

        assert!(matches!(
            result,
            Err(ClinicError::NotFound(ResourceKind::Dentist))
        ));
        assert!(fx.turns.find_by_patient(patient.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_both_missing_reports_patient() {
        let fx = fixture();

        let result = fx.booking.create(checkup(7, 8)).await;

        assert!(matches!(
            result,
            Err(ClinicError::NotFound(ResourceKind::Patient))
        ));
    }

    #[tokio::test]
    async fn test_get_by_id_reflects_current_patient() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let dentist = add_dentist(&fx, "Bob", "R1").await;
        let turn = fx
            .booking
            .create(checkup(patient.id, dentist.id))
            .await
            .unwrap();

        let mut renamed = patient.clone();
        renamed.address = "Calle 22".into();
        fx.patients.update(renamed.clone()).await.unwrap();

        let fetched = fx.booking.get_by_id(turn.id).await.unwrap();
        assert_eq!(fetched.patient, renamed);
        assert_eq!(fetched.dentist, dentist);
    }

    #[tokio::test]
    async fn test_dangling_reference_reads_as_missing_turn() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let dentist = add_dentist(&fx, "Bob", "R1").await;
        let turn = fx
            .booking
            .create(checkup(patient.id, dentist.id))
            .await
            .unwrap();

        fx.dentists.delete(dentist.id).await.unwrap();

        assert!(matches!(
            fx.booking.get_by_id(turn.id).await,
            Err(ClinicError::NotFound(ResourceKind::Turn))
        ));
        assert!(
            fx.booking
                .get_by_patient_id(patient.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_get_by_patient_id() {
        let fx = fixture();
        let ana = add_patient(&fx, "Ana", "1").await;
        let eva = add_patient(&fx, "Eva", "2").await;
        let bob = add_dentist(&fx, "Bob", "R1").await;

        fx.booking.create(checkup(ana.id, bob.id)).await.unwrap();
        fx.booking.create(checkup(eva.id, bob.id)).await.unwrap();
        fx.booking.create(checkup(ana.id, bob.id)).await.unwrap();

        let turns = fx.booking.get_by_patient_id(ana.id).await.unwrap();
        let ids: Vec<u64> = turns.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![1, 3]);
        assert!(turns.iter().all(|t| t.patient.id == ana.id));
    }

    #[tokio::test]
    async fn test_get_by_patient_id_without_turns() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;

        let turns = fx.booking.get_by_patient_id(patient.id).await.unwrap();
        assert!(turns.is_empty());

        assert!(matches!(
            fx.booking.get_by_patient_id(404).await,
            Err(ClinicError::NotFound(ResourceKind::Patient))
        ));
    }

    #[tokio::test]
    async fn test_update_changes_dentist_but_not_patient() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let bob = add_dentist(&fx, "Bob", "R1").await;
        let carl = add_dentist(&fx, "Carl", "R2").await;
        let turn = fx.booking.create(checkup(patient.id, bob.id)).await.unwrap();

        let later = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        let updated = fx
            .booking
            .update(
                turn.id,
                TurnUpdate {
                    date: later,
                    description: "cleaning".into(),
                    dentist_id: carl.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.dentist.id, carl.id);
        assert_eq!(updated.patient.id, patient.id);
        assert_eq!(updated.date, later);
        assert_eq!(updated.description, "cleaning");
        assert_eq!(updated.created_at, turn.created_at);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let bob = add_dentist(&fx, "Bob", "R1").await;
        let turn = fx.booking.create(checkup(patient.id, bob.id)).await.unwrap();

        let to_dentist = |dentist_id| TurnUpdate {
            date: new_year_morning(),
            description: "x".into(),
            dentist_id,
        };

        assert!(matches!(
            fx.booking.update(999, to_dentist(bob.id)).await,
            Err(ClinicError::NotFound(ResourceKind::Turn))
        ));
        assert!(matches!(
            fx.booking.update(turn.id, to_dentist(77)).await,
            Err(ClinicError::NotFound(ResourceKind::Dentist))
        ));
        // Failed update leaves the turn alone
        let unchanged = fx.booking.get_by_id(turn.id).await.unwrap();
        assert_eq!(unchanged.description, "checkup");
    }

    #[tokio::test]
    async fn test_update_with_removed_patient_writes_nothing() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let bob = add_dentist(&fx, "Bob", "R1").await;
        let turn = fx.booking.create(checkup(patient.id, bob.id)).await.unwrap();

        fx.patients.delete(patient.id).await.unwrap();

        let result = fx
            .booking
            .update(
                turn.id,
                TurnUpdate {
                    date: new_year_morning(),
                    description: "CHANGED".into(),
                    dentist_id: bob.id,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ClinicError::NotFound(ResourceKind::Turn))
        ));
        let stored = fx.turns.find_by_id(turn.id).await.unwrap().unwrap();
        assert_eq!(stored.description, "checkup");
    }

    #[tokio::test]
    async fn test_delete() {
        let fx = fixture();
        let patient = add_patient(&fx, "Ana", "1").await;
        let bob = add_dentist(&fx, "Bob", "R1").await;
        let turn = fx.booking.create(checkup(patient.id, bob.id)).await.unwrap();

        assert!(matches!(
            fx.booking.delete(999).await,
            Err(ClinicError::NotFound(ResourceKind::Turn))
        ));

        fx.booking.delete(turn.id).await.unwrap();
        assert!(matches!(
            fx.booking.get_by_id(turn.id).await,
            Err(ClinicError::NotFound(ResourceKind::Turn))
        ));
    }

    #[tokio::test]
    async fn test_clinic_day_scenario() {
        let fx = fixture();
        let ana = add_patient(&fx, "Ana", "1").await;
        let bob = add_dentist(&fx, "Bob", "R1").await;
        assert_eq!(ana.id, 1);
        assert_eq!(bob.id, 1);

        let turn = fx.booking.create(checkup(1, 1)).await.unwrap();
        assert_eq!(turn.id, 1);

        assert!(matches!(
            fx.booking.create(checkup(99, 1)).await,
            Err(ClinicError::NotFound(ResourceKind::Patient))
        ));
    }
}
