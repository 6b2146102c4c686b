//! Show search result normalization
//!
//! The search endpoint answers with `[{score, show: {...}}, ...]`. Only the
//! nested show record is kept, and its optional image descriptor is folded
//! into a guaranteed URL.

use serde::{Deserialize, Deserializer};

use crate::types::{MISSING_IMAGE_URL, Show};

/// One element of the search response, wrapping a show record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSearchResult {
    pub show: RawShow,
}

/// Show record as sent by the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawShow {
    pub id: u64,
    pub name: String,

    /// `null` for shows nobody has written a summary for yet
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "deserialize_image")]
    pub image: ImageDescriptor,
}

/// Artwork availability for a show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageDescriptor {
    /// Medium-resolution image URL
    Present(String),
    #[default]
    Absent,
}

impl ImageDescriptor {
    /// URL to display, substituting the placeholder when absent
    pub fn url_or_fallback(self) -> String {
        match self {
            Self::Present(url) => url,
            Self::Absent => MISSING_IMAGE_URL.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawImage {
    #[serde(default)]
    medium: Option<String>,
}

/// `image` is either `null` or `{medium, original}`; a null or blank
/// `medium` is treated the same as no image at all
fn deserialize_image<'de, D>(deserializer: D) -> Result<ImageDescriptor, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawImage>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|image| image.medium)
        .filter(|url| !url.trim().is_empty())
        .map_or(ImageDescriptor::Absent, ImageDescriptor::Present))
}

/// Maps a raw show record into a [`Show`]
///
/// Total: every raw record yields a show with a non-empty image URL.
pub fn normalize_show(raw: RawShow) -> Show {
    Show {
        id: raw.id,
        name: raw.name,
        summary: raw.summary.unwrap_or_default(),
        image: raw.image.url_or_fallback(),
    }
}

/// Maps a search response into shows, preserving upstream order
pub fn normalize_search_results(results: Vec<RawSearchResult>) -> Vec<Show> {
    results
        .into_iter()
        .map(|result| normalize_show(result.show))
        .collect()
}
