//! JSON file storage implementation.
//!
//! Stores each durable slot as a pretty-printed JSON file in a data
//! directory (`.questline` by default): `active.json`, `completed.json` and
//! `profile.json`. A missing file reads as the slot's empty state.

use std::path::{Path, PathBuf};

use questline_core::{ActiveQuestRecord, CompletedQuestRecord, UserProfile};
use tokio::fs;

use super::{Result, Storage};

const ACTIVE_FILE: &str = "active.json";
const ARCHIVE_FILE: &str = "completed.json";
const PROFILE_FILE: &str = "profile.json";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn slot_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    async fn write_slot<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.slot_path(file), json.as_bytes()).await?;
        Ok(())
    }

    async fn read_slot<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        match fs::read_to_string(self.slot_path(file)).await {
            Ok(json) => {
                let value = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_active(&mut self, records: &[ActiveQuestRecord]) -> Result<()> {
        self.write_slot(ACTIVE_FILE, &records).await
    }

    async fn load_active(&self) -> Result<Vec<ActiveQuestRecord>> {
        Ok(self.read_slot(ACTIVE_FILE).await?.unwrap_or_default())
    }

    async fn save_archive(&mut self, records: &[CompletedQuestRecord]) -> Result<()> {
        self.write_slot(ARCHIVE_FILE, &records).await
    }

    async fn load_archive(&self) -> Result<Vec<CompletedQuestRecord>> {
        Ok(self.read_slot(ARCHIVE_FILE).await?.unwrap_or_default())
    }

    async fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        self.write_slot(PROFILE_FILE, profile).await
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>> {
        self.read_slot(PROFILE_FILE).await
    }
}
