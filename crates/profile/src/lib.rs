//! User profile store.
//!
//! Holds the local user's interests, last known location, and onboarding
//! flag, persisting through the same [`Storage`] port as the quest tracker.
//! The lifecycle core only ever consumes the `location` field, as input to
//! the proximity gate.

#![warn(missing_docs)]

use chrono::Utc;
use questline_core::{Coordinate, UserProfile};
use questline_storage::Storage;
use tracing::warn;

/// Profile store over an injected storage backend.
///
/// Mutations persist immediately with the same best-effort policy as the
/// tracker: a failed write is logged and the in-memory profile stays
/// authoritative for the session.
pub struct ProfileStore<S: Storage> {
    storage: S,
    profile: UserProfile,
}

impl<S: Storage> ProfileStore<S> {
    /// Create a store with a fresh default profile. Call [`load`] to pick up
    /// a previously persisted one.
    ///
    /// [`load`]: ProfileStore::load
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            profile: UserProfile::new(Utc::now()),
        }
    }

    /// Hydrate the profile from storage, keeping the default when none was
    /// ever saved or the read fails.
    pub async fn load(&mut self) {
        match self.storage.load_profile().await {
            Ok(Some(profile)) => self.profile = profile,
            Ok(None) => {}
            Err(e) => warn!("failed to load profile: {e}"),
        }
    }

    /// The current profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Last known location, if any.
    pub fn location(&self) -> Option<Coordinate> {
        self.profile.location
    }

    /// Record a new location and persist.
    pub async fn set_location(&mut self, location: Coordinate) {
        self.profile.location = Some(location);
        self.persist().await;
    }

    /// Replace the selected interests and persist.
    pub async fn set_interests(&mut self, interests: Vec<String>) {
        self.profile.interests = interests;
        self.persist().await;
    }

    /// Mark onboarding finished and persist.
    pub async fn complete_onboarding(&mut self) {
        self.profile.onboarding_complete = true;
        self.persist().await;
    }

    async fn persist(&mut self) {
        if let Err(e) = self.storage.save_profile(&self.profile).await {
            warn!("failed to persist profile: {e}");
        }
    }
}
