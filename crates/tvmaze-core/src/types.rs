//! Normalized data types
//!
//! These are the only show/episode shapes the rest of the crate sees.
//! Upstream records are mapped into them in [`crate::normalize`].

use serde::{Deserialize, Serialize};

/// Identifier assigned to a show by the catalog
pub type ShowId = u64;

/// Placeholder image used when the catalog has no artwork for a show
pub const MISSING_IMAGE_URL: &str = "https://tinyurl.com/missing-tv";

/// A show as returned by a search
///
/// All fields implement Serialize and Deserialize for Tauri compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Catalog identifier (e.g., 1767)
    pub id: ShowId,

    /// Show title
    pub name: String,

    /// Summary, may contain HTML markup (e.g., "<p>A <b>drama</b>.</p>")
    pub summary: String,

    /// Medium-resolution image URL, or [`MISSING_IMAGE_URL`]; never empty
    pub image: String,
}

/// A single episode of a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub season: u32,

    /// Position within the season
    pub number: u32,
}

impl Episode {
    /// Human-readable line used by the episodes panel
    ///
    /// # Example
    /// ```
    /// use tvmaze_core::Episode;
    /// let episode = Episode { id: 1, name: "Pilot".into(), season: 1, number: 1 };
    /// assert_eq!(episode.label(), "Pilot (season 1, episode 1)");
    /// ```
    pub fn label(&self) -> String {
        format!(
            "{} (season {}, episode {})",
            self.name, self.season, self.number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_serialization() {
        let show = Show {
            id: 1767,
            name: "The Bletchley Circle".to_string(),
            summary: "<p>Four women</p>".to_string(),
            image: MISSING_IMAGE_URL.to_string(),
        };

        let json = serde_json::to_string(&show).expect("Serialization should succeed");
        let deserialized: Show =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(show, deserialized);
    }

    #[test]
    fn test_episode_label() {
        let episode = Episode {
            id: 12,
            name: "Cracking the Code".to_string(),
            season: 2,
            number: 3,
        };
        assert_eq!(episode.label(), "Cracking the Code (season 2, episode 3)");
    }
}
