use super::models::{NewTurn, TurnRecord};
use crate::error::ClinicError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait TurnRepository: Send + Sync {
    /// Assign the next id and persist. Does not check the references.
    async fn create(
        &self,
        turn: NewTurn,
        created_at: DateTime<Utc>,
    ) -> Result<TurnRecord, ClinicError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<TurnRecord>, ClinicError>;

    /// All turns of a patient in id order
    async fn find_by_patient(&self, patient_id: u64) -> Result<Vec<TurnRecord>, ClinicError>;

    /// Overwrite an existing turn
    async fn update(&self, turn: TurnRecord) -> Result<TurnRecord, ClinicError>;

    /// Returns false when nothing was removed
    async fn delete(&self, id: u64) -> Result<bool, ClinicError>;
}
