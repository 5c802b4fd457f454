//! The quest lifecycle state machine.
//!
//! A [`QuestTracker`] owns the single active quest record and the archive of
//! completed runs. State lives in memory and is written through the injected
//! [`Storage`] port after every mutation; a failed write is logged and
//! swallowed, leaving the in-memory copy authoritative for the session.

use chrono::Utc;
use questline_core::{
    ActiveQuestRecord, CompletedQuestRecord, QuestDefinition, QuestId, StopId,
};
use questline_storage::Storage;
use tracing::warn;

/// Errors signalled by lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Starting while another quest is active
    #[error("quest '{0}' is already active; complete or cancel it first")]
    QuestAlreadyActive(QuestId),

    /// Advancing or completing with nothing active
    #[error("no active quest")]
    NoActiveQuest,

    /// The definition passed to advance does not match the active quest
    #[error("active quest is '{expected}', not '{actual}'")]
    WrongQuest {
        /// Quest the tracker has active
        expected: QuestId,
        /// Quest the caller tried to advance
        actual: QuestId,
    },

    /// The stop being advanced is not the current stop
    #[error("expected stop '{expected}' next, not '{actual}'")]
    UnexpectedStop {
        /// The definition's stop at the current index
        expected: StopId,
        /// Stop the caller tried to complete
        actual: StopId,
    },

    /// Every stop is already complete
    #[error("all stops are already complete")]
    QuestFinished,
}

/// Tracks the single active quest and the append-only archive.
pub struct QuestTracker<S: Storage> {
    storage: S,
    active: Option<ActiveQuestRecord>,
    archive: Vec<CompletedQuestRecord>,
}

impl<S: Storage> QuestTracker<S> {
    /// Create an empty tracker over a storage backend. Call [`load`] to
    /// hydrate previously persisted state.
    ///
    /// [`load`]: QuestTracker::load
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            active: None,
            archive: Vec::new(),
        }
    }

    /// Hydrate the active slot and archive from storage.
    ///
    /// Read failures degrade to empty state rather than propagating; losing
    /// a corrupt slot beats refusing to start.
    pub async fn load(&mut self) {
        self.active = match self.storage.load_active().await {
            Ok(mut records) => {
                if records.len() > 1 {
                    warn!("active slot held {} records; keeping the first", records.len());
                    records.truncate(1);
                }
                records.pop()
            }
            Err(e) => {
                warn!("failed to load active slot: {e}");
                None
            }
        };
        self.archive = match self.storage.load_archive().await {
            Ok(records) => records,
            Err(e) => {
                warn!("failed to load archive slot: {e}");
                Vec::new()
            }
        };
    }

    /// Whether a quest is currently in progress.
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// The active quest record, if any.
    pub fn active(&self) -> Option<&ActiveQuestRecord> {
        self.active.as_ref()
    }

    /// Completed runs, oldest first.
    pub fn archive(&self) -> &[CompletedQuestRecord] {
        &self.archive
    }

    /// Whether the archive holds at least one completed run of `quest_id`.
    pub fn is_completed(&self, quest_id: &QuestId) -> bool {
        self.archive.iter().any(|r| &r.quest_id == quest_id)
    }

    /// Start a quest.
    ///
    /// The single-active-quest invariant is enforced here: starting while
    /// another quest is active returns [`TrackerError::QuestAlreadyActive`]
    /// instead of overwriting. The new record begins at stop index 0 and is
    /// persisted before this returns.
    pub async fn start(&mut self, quest_id: QuestId) -> Result<ActiveQuestRecord, TrackerError> {
        if let Some(active) = &self.active {
            return Err(TrackerError::QuestAlreadyActive(active.quest_id.clone()));
        }

        let record = ActiveQuestRecord::new(quest_id, Utc::now());
        self.active = Some(record.clone());
        self.persist_active().await;
        Ok(record)
    }

    /// Mark the current stop of the active quest complete.
    ///
    /// Rejects a definition that doesn't match the active quest, a stop id
    /// that isn't the definition's stop at the current index, and any advance
    /// past the final stop. On success the stop id is appended and the index
    /// increments by exactly one; the updated record is persisted and
    /// returned.
    pub async fn advance_stop(
        &mut self,
        quest: &QuestDefinition,
        stop_id: &StopId,
    ) -> Result<ActiveQuestRecord, TrackerError> {
        let active = self.active.as_mut().ok_or(TrackerError::NoActiveQuest)?;

        if active.quest_id != quest.quest_id {
            return Err(TrackerError::WrongQuest {
                expected: active.quest_id.clone(),
                actual: quest.quest_id.clone(),
            });
        }

        let expected = quest
            .stop_at(active.current_stop_index)
            .ok_or(TrackerError::QuestFinished)?;
        if &expected.stop_id != stop_id {
            return Err(TrackerError::UnexpectedStop {
                expected: expected.stop_id.clone(),
                actual: stop_id.clone(),
            });
        }

        active.completed_stop_ids.push(stop_id.clone());
        active.current_stop_index += 1;
        let updated = active.clone();

        self.persist_active().await;
        Ok(updated)
    }

    /// Complete the active quest, archiving it.
    ///
    /// No-op returning `None` when nothing is active. Otherwise the record is
    /// snapshotted into the archive with `completed_at = now`, the active
    /// slot is cleared, and both slots are persisted before returning.
    pub async fn complete(&mut self) -> Option<CompletedQuestRecord> {
        let active = self.active.take()?;

        let record = CompletedQuestRecord {
            quest_id: active.quest_id,
            started_at: active.started_at,
            completed_at: Utc::now(),
            completed_stop_ids: active.completed_stop_ids,
        };
        self.archive.push(record.clone());

        self.persist_active().await;
        self.persist_archive().await;
        Some(record)
    }

    /// Discard the active quest.
    ///
    /// Idempotent: clearing an already-empty slot is a no-op, so UI flows
    /// can call this before navigating away without checking first. The
    /// cleared slot is persisted before returning so a subsequent read never
    /// sees a stale active record.
    pub async fn cancel(&mut self) {
        self.active = None;
        self.persist_active().await;
    }

    async fn persist_active(&mut self) {
        let slot: Vec<ActiveQuestRecord> = self.active.iter().cloned().collect();
        if let Err(e) = self.storage.save_active(&slot).await {
            warn!("failed to persist active slot: {e}");
        }
    }

    async fn persist_archive(&mut self) {
        if let Err(e) = self.storage.save_archive(&self.archive).await {
            warn!("failed to persist archive slot: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_core::{ActivityKind, Coordinate, Difficulty, StopDefinition};
    use questline_storage::{JsonStorage, MemoryStorage};

    fn stop(id: &str, latitude: f64, longitude: f64) -> StopDefinition {
        StopDefinition {
            stop_id: StopId::new(id),
            name: id.to_string(),
            description: String::new(),
            address: String::new(),
            coordinate: Coordinate::new(latitude, longitude),
            activity: ActivityKind::Visit,
        }
    }

    fn three_stop_quest() -> QuestDefinition {
        QuestDefinition {
            quest_id: QuestId::new("laneway-art"),
            title: "Laneway Art Walk".to_string(),
            summary: String::new(),
            full_description: String::new(),
            tags: vec!["art".to_string()],
            location: Coordinate::new(-37.8136, 144.9631),
            stops: vec![
                stop("hosier-lane", -37.8166, 144.9690),
                stop("ac-dc-lane", -37.8147, 144.9700),
                stop("duckboard-place", -37.8150, 144.9710),
            ],
            estimated_duration_minutes: 60,
            total_distance_km: 1.5,
            difficulty: Difficulty::Easy,
            requirements: Vec::new(),
            accessibility: None,
            hero_image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_start_creates_record_at_index_zero() {
        let mut tracker = QuestTracker::new(MemoryStorage::new());

        let record = tracker.start(QuestId::new("laneway-art")).await.unwrap();
        assert_eq!(record.current_stop_index, 0);
        assert!(record.completed_stop_ids.is_empty());
        assert!(tracker.has_active());
        assert_eq!(tracker.active().unwrap().current_stop_index, 0);
    }

    #[tokio::test]
    async fn test_second_start_is_a_conflict() {
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        tracker.start(QuestId::new("laneway-art")).await.unwrap();

        let err = tracker.start(QuestId::new("market-tastes")).await.unwrap_err();
        assert_eq!(
            err,
            TrackerError::QuestAlreadyActive(QuestId::new("laneway-art"))
        );
        // The original quest is untouched.
        assert_eq!(
            tracker.active().unwrap().quest_id,
            QuestId::new("laneway-art")
        );
    }

    #[tokio::test]
    async fn test_full_walkthrough_archives_the_quest() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        tracker.start(quest.quest_id.clone()).await.unwrap();

        for stop in &quest.stops {
            tracker.advance_stop(&quest, &stop.stop_id).await.unwrap();
        }
        let completed = tracker.complete().await.unwrap();

        assert!(!tracker.has_active());
        assert!(tracker.is_completed(&quest.quest_id));
        assert_eq!(completed.completed_stop_ids.len(), quest.stop_count());
        assert_eq!(
            tracker.archive().last().unwrap().completed_stop_ids.len(),
            quest.stop_count()
        );
    }

    #[tokio::test]
    async fn test_advance_rejects_out_of_order_stop() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        tracker.start(quest.quest_id.clone()).await.unwrap();

        let err = tracker
            .advance_stop(&quest, &StopId::new("ac-dc-lane"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TrackerError::UnexpectedStop {
                expected: StopId::new("hosier-lane"),
                actual: StopId::new("ac-dc-lane"),
            }
        );
        assert_eq!(tracker.active().unwrap().current_stop_index, 0);
    }

    #[tokio::test]
    async fn test_advance_rejects_wrong_quest() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        tracker.start(QuestId::new("market-tastes")).await.unwrap();

        let err = tracker
            .advance_stop(&quest, &StopId::new("hosier-lane"))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::WrongQuest { .. }));
    }

    #[tokio::test]
    async fn test_advance_past_last_stop_is_rejected() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        tracker.start(quest.quest_id.clone()).await.unwrap();
        for stop in &quest.stops {
            tracker.advance_stop(&quest, &stop.stop_id).await.unwrap();
        }

        let err = tracker
            .advance_stop(&quest, &StopId::new("hosier-lane"))
            .await
            .unwrap_err();
        assert_eq!(err, TrackerError::QuestFinished);
    }

    #[tokio::test]
    async fn test_advance_without_active_quest() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());

        let err = tracker
            .advance_stop(&quest, &StopId::new("hosier-lane"))
            .await
            .unwrap_err();
        assert_eq!(err, TrackerError::NoActiveQuest);
    }

    #[tokio::test]
    async fn test_complete_without_active_quest_is_noop() {
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        assert!(tracker.complete().await.is_none());
        assert!(tracker.archive().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_twice_is_idempotent() {
        let mut tracker = QuestTracker::new(MemoryStorage::new());
        tracker.start(QuestId::new("laneway-art")).await.unwrap();

        tracker.cancel().await;
        assert!(!tracker.has_active());
        tracker.cancel().await;
        assert!(!tracker.has_active());
    }

    #[tokio::test]
    async fn test_restart_after_completion_appends_second_archive_entry() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());

        for _ in 0..2 {
            tracker.start(quest.quest_id.clone()).await.unwrap();
            for stop in &quest.stops {
                tracker.advance_stop(&quest, &stop.stop_id).await.unwrap();
            }
            tracker.complete().await.unwrap();
        }

        assert_eq!(tracker.archive().len(), 2);
        assert!(tracker.is_completed(&quest.quest_id));
    }

    #[tokio::test]
    async fn test_every_mutation_attempts_a_write() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new());

        tracker.start(quest.quest_id.clone()).await.unwrap();
        tracker
            .advance_stop(&quest, &quest.stops[0].stop_id)
            .await
            .unwrap();
        tracker.cancel().await;

        // start + advance + cancel, one active-slot write each.
        assert_eq!(tracker.storage.write_count(), 3);
    }

    #[tokio::test]
    async fn test_write_failures_leave_memory_state_authoritative() {
        let quest = three_stop_quest();
        let mut tracker = QuestTracker::new(MemoryStorage::new().with_failing_writes());

        tracker.start(quest.quest_id.clone()).await.unwrap();
        tracker
            .advance_stop(&quest, &quest.stops[0].stop_id)
            .await
            .unwrap();

        assert!(tracker.has_active());
        assert_eq!(tracker.active().unwrap().current_stop_index, 1);
    }

    #[test]
    fn test_gate_evaluates_current_stop_not_a_later_one() {
        use crate::gate::{can_complete_stop, COMPLETION_RADIUS_METERS};

        let quest = three_stop_quest();
        let current = quest.stop_at(0).map(|s| s.coordinate);

        // Standing at stop 2 while stop 1 is current must not open the gate.
        let at_second_stop = quest.stops[1].coordinate;
        assert!(!can_complete_stop(
            Some(at_second_stop),
            current,
            COMPLETION_RADIUS_METERS
        ));

        // Standing at stop 1 does.
        assert!(can_complete_stop(
            Some(quest.stops[0].coordinate),
            current,
            COMPLETION_RADIUS_METERS
        ));
    }

    #[tokio::test]
    async fn test_state_survives_reload_from_disk() {
        let quest = three_stop_quest();
        let dir = tempfile::tempdir().unwrap();

        {
            let storage = JsonStorage::new(dir.path()).await.unwrap();
            let mut tracker = QuestTracker::new(storage);
            tracker.start(quest.quest_id.clone()).await.unwrap();
            tracker
                .advance_stop(&quest, &quest.stops[0].stop_id)
                .await
                .unwrap();
        }

        let storage = JsonStorage::new(dir.path()).await.unwrap();
        let mut tracker = QuestTracker::new(storage);
        tracker.load().await;

        let active = tracker.active().unwrap();
        assert_eq!(active.quest_id, quest.quest_id);
        assert_eq!(active.current_stop_index, 1);
        assert_eq!(
            active.completed_stop_ids,
            vec![quest.stops[0].stop_id.clone()]
        );
    }
}
