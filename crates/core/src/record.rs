//! Lifecycle records owned by the quest tracker.

use serde::{Deserialize, Serialize};

use crate::id::{QuestId, StopId};
use crate::Time;

/// Lifecycle status of a quest instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    /// In progress
    Active,
    /// Finished and archived
    Completed,
}

/// The single in-progress quest.
///
/// At most one of these exists system-wide. `completed_stop_ids` is
/// append-only and its length always equals `current_stop_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveQuestRecord {
    /// Which quest is in progress
    pub quest_id: QuestId,

    /// Always `Active` while the record exists
    pub status: QuestStatus,

    /// When the quest was started; immutable
    pub started_at: Time,

    /// 0-based index of the next stop to visit, bounded by the stop count
    pub current_stop_index: usize,

    /// Stops completed so far, in completion order
    pub completed_stop_ids: Vec<StopId>,

    /// Reserved for pause semantics
    pub paused_at: Option<Time>,

    /// Set on the transition out of the active state
    pub completed_at: Option<Time>,
}

impl ActiveQuestRecord {
    /// Create a fresh record for a just-started quest.
    pub fn new(quest_id: QuestId, started_at: Time) -> Self {
        Self {
            quest_id,
            status: QuestStatus::Active,
            started_at,
            current_stop_index: 0,
            completed_stop_ids: Vec::new(),
            paused_at: None,
            completed_at: None,
        }
    }
}

/// Immutable snapshot of a finished quest, appended to the archive.
///
/// A quest may appear more than once in the archive: re-starting after
/// completion produces a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedQuestRecord {
    /// Which quest was finished
    pub quest_id: QuestId,

    /// When the run started
    pub started_at: Time,

    /// When the run finished
    pub completed_at: Time,

    /// Every stop completed, in order
    pub completed_stop_ids: Vec<StopId>,
}

impl CompletedQuestRecord {
    /// Wall-clock minutes between start and completion.
    pub fn duration_minutes(&self) -> i64 {
        (self.completed_at - self.started_at).num_minutes()
    }
}
