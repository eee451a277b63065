use crate::error::{ClinicError, ResourceKind, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

const SEQUENCES_TREE: &str = "sequences";

/// Handle to the clinic's sled database. Cloning shares the same database.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open (or create) the database at `path`, creating parent directories first.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClinicError::Storage(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn tree(&self, name: &str) -> Result<sled::Tree> {
        Ok(self.db.open_tree(name)?)
    }

    /// Allocate the next id of a named sequence. The first id handed out is 1.
    pub fn next_id(&self, sequence: &str) -> Result<u64> {
        let sequences = self.tree(SEQUENCES_TREE)?;
        let updated = sequences.update_and_fetch(sequence.as_bytes(), |current| {
            let current = current.and_then(decode_id).unwrap_or(0);
            Some(id_key(current + 1).to_vec())
        })?;

        updated
            .as_deref()
            .and_then(decode_id)
            .ok_or_else(|| ClinicError::Storage(format!("sequence {} is corrupt", sequence)))
    }

    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await?;
        Ok(())
    }
}

/// Big-endian key so tree iteration follows id order.
pub fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

pub fn decode_id(bytes: &[u8]) -> Option<u64> {
    <[u8; 8]>::try_from(bytes).ok().map(u64::from_be_bytes)
}

/// Insert `value` only when `key` is vacant.
pub fn insert_new<K, T>(tree: &sled::Tree, key: K, value: &T, kind: ResourceKind) -> Result<()>
where
    K: AsRef<[u8]>,
    T: Serialize,
{
    let bytes = serde_json::to_vec(value)?;
    tree.compare_and_swap(key, None::<&[u8]>, Some(bytes))?
        .map_err(|_| ClinicError::AlreadyExists(kind))
}

/// Overwrite `value` at `key`, failing with NotFound when nothing is stored there.
pub fn replace_existing<K, T>(tree: &sled::Tree, key: K, value: &T, kind: ResourceKind) -> Result<()>
where
    K: AsRef<[u8]>,
    T: Serialize,
{
    if !tree.contains_key(key.as_ref())? {
        return Err(ClinicError::NotFound(kind));
    }

    tree.insert(key, serde_json::to_vec(value)?)?;
    Ok(())
}

pub fn get_json<K, T>(tree: &sled::Tree, key: K) -> Result<Option<T>>
where
    K: AsRef<[u8]>,
    T: DeserializeOwned,
{
    match tree.get(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}
