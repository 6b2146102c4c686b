//! Show search and episode lookup
//!
//! [`Catalog`] is the seam the controller depends on; [`CatalogService`] is
//! the implementation backed by the TVmaze HTTP API.

use std::future::Future;

use tracing::debug;

use crate::client::{CatalogClient, ClientConfig};
use crate::error::Result;
use crate::normalize::{RawEpisode, RawSearchResult, normalize_episodes, normalize_search_results};
use crate::types::{Episode, Show, ShowId};
use crate::url::{build_episodes_url, build_search_url};

/// Source of normalized shows and episodes
pub trait Catalog {
    /// Search shows matching a free-text term
    fn search_shows(&self, term: &str) -> impl Future<Output = Result<Vec<Show>>>;

    /// List the episodes of a show
    fn get_episodes(&self, show_id: ShowId) -> impl Future<Output = Result<Vec<Episode>>>;
}

/// Catalog backed by the TVmaze API
///
/// Each call issues exactly one request. Nothing is cached between calls.
pub struct CatalogService {
    client: CatalogClient,
}

impl CatalogService {
    /// Create a new service with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = CatalogClient::new()?;
        Ok(Self { client })
    }

    /// Create a new service with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = CatalogClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Search for shows by term
    ///
    /// The term is sent as given (including empty) after percent-encoding.
    ///
    /// # Returns
    /// One show per upstream result, in upstream order
    ///
    /// # Errors
    /// - `Http` / `HttpStatus` if the request fails
    /// - `Decode` if the body is not a list of search results
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> tvmaze_core::Result<()> {
    /// use tvmaze_core::CatalogService;
    /// let catalog = CatalogService::new()?;
    /// for show in catalog.search_shows("bletchley").await? {
    ///     println!("{}: {}", show.id, show.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_shows(&self, term: &str) -> Result<Vec<Show>> {
        let url = build_search_url(self.client.base_url(), term);
        let results: Vec<RawSearchResult> = self.client.get_json(&url, "search results").await?;

        let shows = normalize_search_results(results);
        debug!(term, count = shows.len(), "shows found");
        Ok(shows)
    }

    /// Get the episode list of a show
    ///
    /// The id is passed through unchecked; an unknown id surfaces as the
    /// catalog's 404.
    ///
    /// # Errors
    /// - `Http` / `HttpStatus` if the request fails
    /// - `Decode` if the body is not a list of episodes
    /// - `NormalizationGap` if any episode lacks id, name, season or number
    pub async fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>> {
        let url = build_episodes_url(self.client.base_url(), show_id);
        let raw: Vec<RawEpisode> = self.client.get_json(&url, "episode list").await?;

        let episodes = normalize_episodes(raw)?;
        debug!(show_id, count = episodes.len(), "episodes found");
        Ok(episodes)
    }
}

impl Catalog for CatalogService {
    async fn search_shows(&self, term: &str) -> Result<Vec<Show>> {
        CatalogService::search_shows(self, term).await
    }

    async fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>> {
        CatalogService::get_episodes(self, show_id).await
    }
}
