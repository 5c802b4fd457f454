//! Storage trait abstraction.

use async_trait::async_trait;
use questline_core::{ActiveQuestRecord, CompletedQuestRecord, UserProfile};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Persistence port for Questline's durable slots.
///
/// Three independent slots: the active slot (a list holding zero or one
/// [`ActiveQuestRecord`]), the archive slot (an append-only, insertion-ordered
/// list of [`CompletedQuestRecord`]), and the user profile. Backends can be
/// swapped; the lifecycle tracker treats its in-memory copy as authoritative
/// and tolerates write failures.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Active slot ===

    /// Replace the active slot. An empty list means no active quest.
    async fn save_active(&mut self, records: &[ActiveQuestRecord]) -> Result<()>;

    /// Load the active slot. Missing state reads as empty.
    async fn load_active(&self) -> Result<Vec<ActiveQuestRecord>>;

    // === Archive slot ===

    /// Replace the archive slot, preserving insertion order.
    async fn save_archive(&mut self, records: &[CompletedQuestRecord]) -> Result<()>;

    /// Load the archive slot. Missing state reads as empty.
    async fn load_archive(&self) -> Result<Vec<CompletedQuestRecord>>;

    // === Profile slot ===

    /// Save the user profile.
    async fn save_profile(&mut self, profile: &UserProfile) -> Result<()>;

    /// Load the user profile, if one was ever saved.
    async fn load_profile(&self) -> Result<Option<UserProfile>>;
}
