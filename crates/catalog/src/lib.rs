//! Read-only quest catalog.
//!
//! Quest definitions are static reference data: the catalog can look them up
//! by id, resolve a stop by index, and produce filtered/sorted views for
//! browsing, but never mutates them.

#![warn(missing_docs)]

use std::path::Path;

use questline_core::{distance_meters, Coordinate, QuestDefinition, QuestId, StopDefinition};

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// I/O error reading a catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed catalog JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sort orders for browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Nearest first; quests without a known distance sort last
    #[default]
    Distance,
    /// Shortest estimated duration first
    Duration,
    /// Easiest first
    Difficulty,
}

/// A quest paired with its distance from the browsing origin, if known.
#[derive(Debug, Clone)]
pub struct QuestSummary<'a> {
    /// The underlying definition
    pub quest: &'a QuestDefinition,

    /// Meters from the origin to the quest's anchor coordinate
    pub distance_meters: Option<f64>,
}

/// An immutable collection of quest definitions.
pub struct QuestCatalog {
    quests: Vec<QuestDefinition>,
}

impl QuestCatalog {
    /// Build a catalog from already-parsed definitions.
    pub fn from_definitions(quests: Vec<QuestDefinition>) -> Self {
        Self { quests }
    }

    /// Parse a catalog from a JSON array of quest definitions.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let quests = serde_json::from_str(json)?;
        Ok(Self { quests })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The bundled demo catalog of Melbourne quests.
    pub fn builtin() -> Self {
        // The embedded asset is validated by tests, so a parse failure here
        // is a build defect, not a runtime condition.
        Self::from_json_str(include_str!("../data/quests.json"))
            .unwrap_or_else(|_| Self::from_definitions(Vec::new()))
    }

    /// All quests in catalog order.
    pub fn quests(&self) -> &[QuestDefinition] {
        &self.quests
    }

    /// Look up a quest by id.
    pub fn find_quest(&self, quest_id: &QuestId) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| &q.quest_id == quest_id)
    }

    /// Look up a stop by quest id and 0-based index.
    pub fn find_stop(&self, quest_id: &QuestId, stop_index: usize) -> Option<&StopDefinition> {
        self.find_quest(quest_id)?.stop_at(stop_index)
    }

    /// Browse the catalog: optionally filter by an interest tag, then sort.
    ///
    /// Distances are computed from `origin` to each quest's anchor
    /// coordinate; with no origin every distance is unknown and the
    /// distance sort leaves catalog order intact.
    pub fn browse(
        &self,
        interest: Option<&str>,
        sort: SortBy,
        origin: Option<Coordinate>,
    ) -> Vec<QuestSummary<'_>> {
        let mut summaries: Vec<QuestSummary<'_>> = self
            .quests
            .iter()
            .filter(|q| match interest {
                Some(tag) => q.tags.iter().any(|t| t == tag),
                None => true,
            })
            .map(|quest| QuestSummary {
                quest,
                distance_meters: origin.map(|o| distance_meters(o, quest.location)),
            })
            .collect();

        match sort {
            SortBy::Distance => summaries.sort_by(|a, b| {
                match (a.distance_meters, b.distance_meters) {
                    (Some(x), Some(y)) => x.total_cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            }),
            SortBy::Duration => summaries.sort_by_key(|s| s.quest.estimated_duration_minutes),
            SortBy::Difficulty => summaries.sort_by_key(|s| s.quest.difficulty),
        }

        summaries
    }
}
