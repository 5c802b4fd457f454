//! Interest categories used for onboarding and catalog filtering.

use serde::{Deserialize, Serialize};

/// A selectable interest category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCategory {
    /// Stable id, referenced by quest tags
    pub id: String,

    /// Display name
    pub name: String,

    /// Emoji shown next to the name
    pub icon: String,

    /// Short description of what the category covers
    pub description: String,
}

/// The built-in interest categories.
pub fn builtin_interests() -> Vec<InterestCategory> {
    fn category(id: &str, name: &str, icon: &str, description: &str) -> InterestCategory {
        InterestCategory {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    vec![
        category("art", "Art", "🎨", "Galleries, street art, exhibitions"),
        category("food", "Food", "🍜", "Cafes, restaurants, food markets"),
        category("history", "History", "🏛️", "Museums, heritage sites, landmarks"),
        category("music", "Music", "🎵", "Live venues, music history, festivals"),
        category(
            "architecture",
            "Architecture",
            "🏗️",
            "Buildings, design tours, urban planning",
        ),
    ]
}
