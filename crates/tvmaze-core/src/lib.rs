//! TVmaze Show Finder Core Library
//!
//! Search the TVmaze catalog by keyword, list the matching shows and drill
//! into the episode list of a selected show.
//!
//! # Overview
//!
//! - [`CatalogService`] issues the two catalog requests (show search,
//!   episode lookup) and normalizes the upstream records into [`Show`] and
//!   [`Episode`]
//! - [`render_shows`] and [`render_episodes`] project those lists into a
//!   [`Document`], the in-memory page the host supplies
//! - [`Controller`] binds the page's submit and click events to the above
//!
//! # Example
//!
//! ```no_run
//! use tvmaze_core::{
//!     CatalogService, Controller, ControllerConfig, Document, HandleSelectors,
//!     Result, SubmitEvent, UiEvent, UiHandles,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let page = Document::parse(
//!         r#"<form id="searchForm"><input id="searchForm-term"></form>
//!            <div id="showsList"></div>
//!            <section id="episodesArea"><ul id="episodesList"></ul></section>"#,
//!     );
//!     let ui = UiHandles::locate(&page, &HandleSelectors::default())?;
//!     let controller = Controller::new(CatalogService::new()?, page, ui, ControllerConfig::default());
//!
//!     controller.page_mut().set_value(ui.term_input, "bletchley");
//!     controller
//!         .dispatch(&mut UiEvent::Submit(SubmitEvent::new(ui.search_form)))
//!         .await?;
//!
//!     println!("{}", controller.page().inner_html(ui.shows_list));
//!     Ok(())
//! }
//! ```
//!
//! # Overlapping requests
//!
//! Nothing is cached, paginated or cancelled. When two requests for the same
//! panel overlap, whichever response resolves last is what the panel shows,
//! unless [`ControllerConfig::discard_stale_responses`] is set.

mod catalog;
mod client;
mod controller;
mod dom;
mod error;
pub mod normalize;
mod render;
mod types;
pub mod url;

// Re-export client types
pub use client::{CatalogClient, ClientConfig};

// Re-export error types
pub use error::{CatalogError, Result};

// Re-export normalization functions
pub use normalize::{normalize_episodes, normalize_search_results};

// Re-export the catalog API
pub use catalog::{Catalog, CatalogService};

// Re-export the rendering surface and renderers
pub use dom::{Document, NodeId};
pub use render::{EPISODES_BUTTON_CLASS, SHOW_CLASS, SHOW_ID_KEY, render_episodes, render_shows};

// Re-export the controller
pub use controller::{
    ClickEvent, Controller, ControllerConfig, HandleSelectors, Outcome, PanelState, SubmitEvent,
    UiEvent, UiHandles,
};

// Re-export data types
pub use types::{Episode, MISSING_IMAGE_URL, Show, ShowId};

// Re-export URL helper functions for convenience
pub use url::{build_episodes_url, build_search_url};
