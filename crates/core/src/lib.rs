//! Questline core data models.
//!
//! This crate defines the fundamental data structures shared by the quest
//! lifecycle tracker, the catalog, and the storage backends.

#![warn(missing_docs)]

// Core identities
mod id;

// Geodesy
mod geo;

// Catalog definitions
mod interest;
mod quest;

// Lifecycle records
mod record;

// User profile
mod profile;

// Re-exports
pub use id::{QuestId, StopId};

pub use geo::{distance_meters, format_distance, Coordinate, EARTH_RADIUS_METERS};

pub use interest::{builtin_interests, InterestCategory};
pub use quest::{ActivityKind, Difficulty, QuestDefinition, StopDefinition};

pub use record::{ActiveQuestRecord, CompletedQuestRecord, QuestStatus};

pub use profile::UserProfile;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
