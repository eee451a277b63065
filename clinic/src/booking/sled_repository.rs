use super::models::{NewTurn, TurnRecord};
use super::repository::TurnRepository;
use crate::error::{ClinicError, ResourceKind};
use crate::persistence::{SledStore, decode_id, get_json, id_key, insert_new};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

const TURNS_TREE: &str = "turns";
const TURNS_BY_PATIENT_TREE: &str = "turns_by_patient";

#[derive(Clone)]
pub struct SledTurnRepository {
    store: SledStore,
}

impl SledTurnRepository {
    pub fn new(store: SledStore) -> Self {
        Self { store }
    }

    fn turns_tree(&self) -> Result<sled::Tree, ClinicError> {
        self.store.tree(TURNS_TREE)
    }

    fn turns_by_patient_tree(&self) -> Result<sled::Tree, ClinicError> {
        self.store.tree(TURNS_BY_PATIENT_TREE)
    }
}

/// Index key: patient id then turn id, both big-endian.
fn patient_index_key(patient_id: u64, turn_id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&id_key(patient_id));
    key[8..].copy_from_slice(&id_key(turn_id));
    key
}

#[async_trait]
impl TurnRepository for SledTurnRepository {
    async fn create(
        &self,
        turn: NewTurn,
        created_at: DateTime<Utc>,
    ) -> Result<TurnRecord, ClinicError> {
        let id = self.store.next_id(TURNS_TREE)?;
        let record = TurnRecord::new(id, turn, created_at);

        insert_new(&self.turns_tree()?, id_key(id), &record, ResourceKind::Turn)?;
        self.turns_by_patient_tree()?
            .insert(patient_index_key(record.patient_id, id), sled::IVec::default())?;

        Ok(record)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<TurnRecord>, ClinicError> {
        get_json(&self.turns_tree()?, id_key(id))
    }

    async fn find_by_patient(&self, patient_id: u64) -> Result<Vec<TurnRecord>, ClinicError> {
        let turns_tree = self.turns_tree()?;
        let mut turns = Vec::new();

        for item in self.turns_by_patient_tree()?.scan_prefix(id_key(patient_id)) {
            let (key, _) = item?;
            let Some(turn_id) = decode_id(&key[8..]) else {
                warn!("Skipping malformed turn index key for patient {}", patient_id);
                continue;
            };

            if let Some(record) = get_json::<_, TurnRecord>(&turns_tree, id_key(turn_id))? {
                turns.push(record);
            }
        }

        Ok(turns)
    }

    async fn update(&self, turn: TurnRecord) -> Result<TurnRecord, ClinicError> {
        let turns_tree = self.turns_tree()?;

        let previous: TurnRecord = get_json(&turns_tree, id_key(turn.id))?
            .ok_or(ClinicError::NotFound(ResourceKind::Turn))?;

        turns_tree.insert(id_key(turn.id), serde_json::to_vec(&turn)?)?;

        if previous.patient_id != turn.patient_id {
            let index = self.turns_by_patient_tree()?;
            index.remove(patient_index_key(previous.patient_id, turn.id))?;
            index.insert(patient_index_key(turn.patient_id, turn.id), sled::IVec::default())?;
        }

        Ok(turn)
    }

    async fn delete(&self, id: u64) -> Result<bool, ClinicError> {
        let removed = self.turns_tree()?.remove(id_key(id))?;

        match removed {
            Some(bytes) => {
                let record: TurnRecord = serde_json::from_slice(&bytes)?;
                self.turns_by_patient_tree()?
                    .remove(patient_index_key(record.patient_id, id))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn repository(temp_dir: &TempDir) -> SledTurnRepository {
        let store = SledStore::open(temp_dir.path().join("clinic.sled")).unwrap();
        SledTurnRepository::new(store)
    }

    fn new_turn(patient_id: u64, dentist_id: u64, description: &str) -> NewTurn {
        NewTurn {
            date: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            description: description.into(),
            patient_id,
            dentist_id,
        }
    }

    #[tokio::test]
    async fn test_find_by_patient_in_id_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        repo.create(new_turn(1, 1, "a"), Utc::now()).await.unwrap();
        repo.create(new_turn(2, 1, "b"), Utc::now()).await.unwrap();
        repo.create(new_turn(1, 2, "c"), Utc::now()).await.unwrap();

        let turns = repo.find_by_patient(1).await.unwrap();
        let ids: Vec<u64> = turns.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![1, 3]);
        assert!(repo.find_by_patient(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_patient_ignores_other_patients() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        repo.create(new_turn(256, 1, "x"), Utc::now()).await.unwrap();
        repo.create(new_turn(1, 1, "y"), Utc::now()).await.unwrap();

        let turns = repo.find_by_patient(1).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].description, "y");
    }

    #[tokio::test]
    async fn test_delete_removes_index_entry() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let turn = repo.create(new_turn(1, 1, "a"), Utc::now()).await.unwrap();

        assert!(repo.delete(turn.id).await.unwrap());
        assert!(!repo.delete(turn.id).await.unwrap());
        assert!(repo.find_by_id(turn.id).await.unwrap().is_none());
        assert!(repo.find_by_patient(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_turn() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let record = TurnRecord::new(9, new_turn(1, 1, "a"), Utc::now());
        assert!(matches!(
            repo.update(record).await,
            Err(ClinicError::NotFound(ResourceKind::Turn))
        ));
    }

    #[tokio::test]
    async fn test_update_moves_index_when_patient_changes() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let mut record = repo.create(new_turn(1, 1, "a"), Utc::now()).await.unwrap();
        record.patient_id = 2;
        repo.update(record).await.unwrap();

        assert!(repo.find_by_patient(1).await.unwrap().is_empty());
        assert_eq!(repo.find_by_patient(2).await.unwrap().len(), 1);
    }
}
