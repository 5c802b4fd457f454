//! User profile model.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::Time;

/// A local user profile: interests, last known location, onboarding flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable local identifier; there is no multi-user support
    pub user_id: String,

    /// Selected interest category ids
    pub interests: Vec<String>,

    /// Last known location, if any was ever recorded
    pub location: Option<Coordinate>,

    /// Whether the interest-selection onboarding has been finished
    pub onboarding_complete: bool,

    /// When the profile was first created
    pub created_at: Time,
}

impl UserProfile {
    /// Fresh profile with no interests and no location.
    pub fn new(now: Time) -> Self {
        Self {
            user_id: "local-user".to_string(),
            interests: Vec::new(),
            location: None,
            onboarding_complete: false,
            created_at: now,
        }
    }
}
