//! In-memory storage backend.
//!
//! Used by tests to substitute the persistence port and assert on write
//! attempts, and by ephemeral runs that don't want a data directory.

use questline_core::{ActiveQuestRecord, CompletedQuestRecord, UserProfile};

use super::{Result, Storage, StorageError};

/// Storage backend that keeps every slot in process memory.
#[derive(Default)]
pub struct MemoryStorage {
    active: Vec<ActiveQuestRecord>,
    archive: Vec<CompletedQuestRecord>,
    profile: Option<UserProfile>,
    write_count: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, to exercise callers' degraded paths.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of write attempts observed, including failed ones.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    fn record_write(&mut self) -> Result<()> {
        self.write_count += 1;
        if self.fail_writes {
            return Err(StorageError::Other("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_active(&mut self, records: &[ActiveQuestRecord]) -> Result<()> {
        self.record_write()?;
        self.active = records.to_vec();
        Ok(())
    }

    async fn load_active(&self) -> Result<Vec<ActiveQuestRecord>> {
        Ok(self.active.clone())
    }

    async fn save_archive(&mut self, records: &[CompletedQuestRecord]) -> Result<()> {
        self.record_write()?;
        self.archive = records.to_vec();
        Ok(())
    }

    async fn load_archive(&self) -> Result<Vec<CompletedQuestRecord>> {
        Ok(self.archive.clone())
    }

    async fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        self.record_write()?;
        self.profile = Some(profile.clone());
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.profile.clone())
    }
}
