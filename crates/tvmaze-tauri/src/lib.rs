//! TVmaze Show Finder Tauri Integration
//!
//! Provides a Tauri plugin so a webview frontend can run show searches and
//! episode lookups through the core library.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(tvmaze_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const shows = await invoke('plugin:tvmaze|search_shows', { term: 'bletchley' });
//! const episodes = await invoke('plugin:tvmaze|get_episodes', { showId: shows[0].id });
//! ```

use std::sync::Arc;

use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};
use tvmaze_core::{CatalogService, ClientConfig};

mod commands;

/// Shared catalog handle for all commands
///
/// `CatalogService` holds no mutable state, so commands share it through
/// an `Arc` without locking.
pub struct CatalogState {
    pub(crate) catalog: Arc<CatalogService>,
}

impl CatalogState {
    /// Create a new CatalogState with default configuration
    ///
    /// # Errors
    /// Returns error string if the HTTP client cannot be built
    pub fn new() -> Result<Self, String> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new CatalogState against a custom base URL or timeout
    ///
    /// # Errors
    /// Returns error string if the configuration is invalid
    pub fn with_config(config: ClientConfig) -> Result<Self, String> {
        let catalog = CatalogService::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }
}

/// Initialize the tvmaze plugin
///
/// # Returns
/// A configured TauriPlugin ready to be registered with the Tauri application
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("tvmaze")
        .invoke_handler(tauri::generate_handler![
            commands::search_shows,
            commands::get_episodes
        ])
        .setup(|app, _api| {
            let state = CatalogState::new().map_err(Box::<dyn std::error::Error>::from)?;
            app.manage(state);
            tracing::debug!("tvmaze plugin ready");
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use tvmaze_core::{Episode, Show};
