//! Quest lifecycle tracking for Questline.
//!
//! This crate owns the single-active-quest state machine and the proximity
//! gate that authorizes stop completion.

#![warn(missing_docs)]

pub mod gate;
pub mod tracker;

pub use gate::{can_complete_stop, estimated_walk_minutes, COMPLETION_RADIUS_METERS};
pub use tracker::{QuestTracker, TrackerError};
