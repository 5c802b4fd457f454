//! Quest and stop definitions, as supplied by the read-only catalog.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::id::{QuestId, StopId};

/// What the user does once they reach a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// View & observe the location
    View,
    /// Take a photo
    Photo,
    /// Complete a small task
    Task,
    /// Just visit
    #[default]
    Visit,
}

impl ActivityKind {
    /// Human-readable label for the activity.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::View => "View & Observe",
            ActivityKind::Photo => "Take Photo",
            ActivityKind::Task => "Complete Task",
            ActivityKind::Visit => "Visit",
        }
    }
}

/// How demanding a quest is. Ordered easiest-first so it sorts naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Flat, short, no surprises
    Easy,
    /// A longer walk or trickier stops
    Medium,
    /// Long distances or demanding activities
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// One waypoint within a quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDefinition {
    /// Unique identifier within the quest
    pub stop_id: StopId,

    /// Display name
    pub name: String,

    /// What to look for or do here
    pub description: String,

    /// Street address for display
    pub address: String,

    /// Where the stop physically is
    pub coordinate: Coordinate,

    /// Activity expected at this stop
    #[serde(default)]
    pub activity: ActivityKind,
}

/// A themed sequence of physical stops visited in order.
///
/// Definitions come from the catalog and are read-only: the stop order is
/// fixed and `stop_id` is unique within the quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestDefinition {
    /// Unique identifier
    pub quest_id: QuestId,

    /// Display title
    pub title: String,

    /// One-line pitch shown on cards
    pub summary: String,

    /// Longer description shown on the detail view
    pub full_description: String,

    /// Interest category ids this quest belongs to
    pub tags: Vec<String>,

    /// Anchor coordinate used for "distance to quest" sorting
    pub location: Coordinate,

    /// Ordered stops; never reordered
    pub stops: Vec<StopDefinition>,

    /// Expected time to finish, in minutes
    pub estimated_duration_minutes: u32,

    /// Total walking distance in kilometers
    pub total_distance_km: f64,

    /// Difficulty rating
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Things to bring or know beforehand
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Accessibility notes, when the author provided them
    #[serde(default)]
    pub accessibility: Option<String>,

    /// Hero image shown on cards and the detail view
    #[serde(default)]
    pub hero_image_url: String,
}

impl QuestDefinition {
    /// Number of stops in this quest.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// The stop at a 0-based index, if it exists.
    pub fn stop_at(&self, index: usize) -> Option<&StopDefinition> {
        self.stops.get(index)
    }
}
