//! Episode list normalization
//!
//! Unlike shows there is no substitute for a missing episode field. The
//! catalog does send `number: null` for specials, so every field is decoded
//! as optional and a gap is reported instead of patched.

use serde::Deserialize;
use tracing::warn;

use crate::error::{CatalogError, Result};
use crate::types::Episode;

/// Episode record as sent by the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEpisode {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
}

/// Maps a raw episode into an [`Episode`]
///
/// # Errors
/// `NormalizationGap` naming the first missing field
pub fn normalize_episode(raw: RawEpisode) -> Result<Episode> {
    let Some(id) = raw.id else {
        return Err(gap("unknown", "id"));
    };
    let episode = id.to_string();

    Ok(Episode {
        id,
        name: raw.name.ok_or_else(|| gap(&episode, "name"))?,
        season: raw.season.ok_or_else(|| gap(&episode, "season"))?,
        number: raw.number.ok_or_else(|| gap(&episode, "number"))?,
    })
}

/// Maps an episode list, preserving upstream order
///
/// The first gap fails the whole list; no partial result is returned.
pub fn normalize_episodes(raw: Vec<RawEpisode>) -> Result<Vec<Episode>> {
    raw.into_iter()
        .map(normalize_episode)
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e| warn!(error = %e, "episode list rejected"))
}

fn gap(episode: &str, field: &'static str) -> CatalogError {
    CatalogError::NormalizationGap {
        episode: episode.to_string(),
        field,
    }
}
