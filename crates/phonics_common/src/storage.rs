//! Persistence adapters for the progress blob.
//!
//! The progress store only needs whole-blob load/save semantics. Adapters
//! own the key; the store never sees paths or storage handles.

use crate::error::PhonicsError;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Fixed storage key. The suffix is bumped together with the schema version.
pub const PROGRESS_KEY: &str = "phonics_progress_v1";

/// Durable key-value slot holding the serialized progress state
pub trait PersistenceAdapter {
    /// Read the stored blob; `Ok(None)` when nothing was saved yet
    fn load(&self) -> Result<Option<Vec<u8>>, PhonicsError>;

    /// Replace the stored blob
    fn save(&mut self, bytes: &[u8]) -> Result<(), PhonicsError>;
}

// ============================================================================
// File Adapter
// ============================================================================

/// Stores the blob as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileAdapter {
    path: PathBuf,
}

impl FileAdapter {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
        }
    }

    /// Adapter under `dir` using the default progress key
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir, PROGRESS_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for FileAdapter {
    fn load(&self) -> Result<Option<Vec<u8>>, PhonicsError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), PhonicsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a crash mid-write never leaves a torn save
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// ============================================================================
// Memory Adapter
// ============================================================================

#[derive(Debug, Default)]
struct MemorySlot {
    bytes: Option<Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: u64,
}

/// In-memory slot. Clones share the same slot, so a second store opened on
/// a clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    slot: Rc<RefCell<MemorySlot>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with raw bytes, e.g. a corrupt save
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let adapter = Self::new();
        adapter.slot.borrow_mut().bytes = Some(bytes.to_vec());
        adapter
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.slot.borrow().bytes.clone()
    }

    /// Number of successful saves
    pub fn write_count(&self) -> u64 {
        self.slot.borrow().writes
    }

    /// Simulate an unreadable store
    pub fn set_fail_reads(&self, fail: bool) {
        self.slot.borrow_mut().fail_reads = fail;
    }

    /// Simulate a full store (quota exceeded)
    pub fn set_fail_writes(&self, fail: bool) {
        self.slot.borrow_mut().fail_writes = fail;
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn load(&self) -> Result<Option<Vec<u8>>, PhonicsError> {
        let slot = self.slot.borrow();
        if slot.fail_reads {
            return Err(PhonicsError::Persistence("storage unavailable".to_string()));
        }
        Ok(slot.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), PhonicsError> {
        let mut slot = self.slot.borrow_mut();
        if slot.fail_writes {
            return Err(PhonicsError::Persistence("quota exceeded".to_string()));
        }
        slot.bytes = Some(bytes.to_vec());
        slot.writes += 1;
        Ok(())
    }
}
