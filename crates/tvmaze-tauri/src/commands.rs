//! Tauri commands for the TVmaze show finder
//!
//! The webview owns the real DOM; these commands hand it the normalized
//! data produced by the same catalog operations the core controller uses.

use tauri::State;
use tvmaze_core::{Episode, Show, ShowId};

use crate::CatalogState;

/// Search shows by term
///
/// # Arguments
/// * `state` - Managed CatalogState from Tauri
/// * `term` - Free-text search term, sent even when empty
///
/// # Returns
/// Normalized shows in catalog order
///
/// # Errors
/// Returns error message as String if the request or decoding fails
#[tauri::command]
pub async fn search_shows(
    state: State<'_, CatalogState>,
    term: String,
) -> Result<Vec<Show>, String> {
    state
        .catalog
        .search_shows(&term)
        .await
        .map_err(|e| e.to_string())
}

/// Get the episode list of a show
///
/// # Arguments
/// * `state` - Managed CatalogState from Tauri
/// * `show_id` - Id of a show returned by `search_shows`
///
/// # Errors
/// Returns error message as String if the request fails or an episode
/// is missing a required field
#[tauri::command]
pub async fn get_episodes(
    state: State<'_, CatalogState>,
    show_id: ShowId,
) -> Result<Vec<Episode>, String> {
    state
        .catalog
        .get_episodes(show_id)
        .await
        .map_err(|e| e.to_string())
}
