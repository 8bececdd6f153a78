use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    state::{LotterySnapshot, SNAPSHOT_VERSION},
};

/// Durable storage for manager state.
///
/// `load` runs once while the manager is constructed; `save` runs after every
/// mutating operation with the full snapshot.
pub trait LotteryPersistence {
    /// Returns `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<LotterySnapshot>>;

    fn save(&self, snapshot: &LotterySnapshot) -> Result<()>;
}

pub fn encode_snapshot(snapshot: &LotterySnapshot) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    snapshot.serialize(&mut bytes).map_err(|e| {
        msg!("[Lottery] failed to encode snapshot: {}", e);
        error!(LotteryError::PersistenceFailed)
    })?;
    Ok(bytes)
}

pub fn decode_snapshot(mut bytes: &[u8]) -> Result<LotterySnapshot> {
    let snapshot = LotterySnapshot::deserialize(&mut bytes).map_err(|e| {
        msg!("[Lottery] failed to decode snapshot: {}", e);
        error!(LotteryError::CorruptSnapshot)
    })?;
    require!(bytes.is_empty(), LotteryError::CorruptSnapshot);
    require_eq!(
        snapshot.version,
        SNAPSHOT_VERSION,
        LotteryError::UnsupportedSnapshotVersion
    );
    Ok(snapshot)
}

/// Keeps the encoded snapshot in memory. Clones share the same buffer, so a
/// test or a second manager can observe what was saved.
#[derive(Clone, Debug, Default)]
pub struct MemoryPersistence {
    stored: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of the last saved snapshot.
    pub fn stored_bytes(&self) -> Option<Vec<u8>> {
        self.stored
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LotteryPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<LotterySnapshot>> {
        self.stored_bytes()
            .map(|bytes| decode_snapshot(&bytes))
            .transpose()
    }

    fn save(&self, snapshot: &LotterySnapshot) -> Result<()> {
        let bytes = encode_snapshot(snapshot)?;
        *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes);
        Ok(())
    }
}

/// Stores the snapshot in a single borsh-encoded file. Writes go to a sibling
/// temporary file first and are renamed over the target.
#[derive(Clone, Debug)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LotteryPersistence for FilePersistence {
    fn load(&self) -> Result<Option<LotterySnapshot>> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_snapshot(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                msg!("[Lottery] failed to read {}: {}", self.path.display(), e);
                err!(LotteryError::PersistenceFailed)
            }
        }
    }

    fn save(&self, snapshot: &LotterySnapshot) -> Result<()> {
        let bytes = encode_snapshot(snapshot)?;
        let temp = self.temp_path();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                msg!("[Lottery] failed to create {}: {}", parent.display(), e);
                error!(LotteryError::PersistenceFailed)
            })?;
        }
        fs::write(&temp, &bytes)
            .and_then(|_| fs::rename(&temp, &self.path))
            .map_err(|e| {
                msg!("[Lottery] failed to write {}: {}", self.path.display(), e);
                error!(LotteryError::PersistenceFailed)
            })
    }
}
