//! URL helper functions for the TVmaze catalog API
//!
//! Every function takes the API base (e.g., "http://api.tvmaze.com/") so
//! tests can point them at a mock server.

/// Production base URL of the catalog API
pub const DEFAULT_BASE_URL: &str = "http://api.tvmaze.com/";

/// Normalizes a base URL so it ends with exactly one slash
///
/// # Example
/// ```
/// use tvmaze_core::url::normalize_base;
/// assert_eq!(normalize_base("http://localhost:8080"), "http://localhost:8080/");
/// assert_eq!(normalize_base("http://localhost:8080//"), "http://localhost:8080/");
/// ```
pub fn normalize_base(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}

/// Builds the show search URL for a given term
///
/// The term is percent-encoded; an empty term is sent as `q=`.
///
/// # Example
/// ```
/// use tvmaze_core::url::build_search_url;
/// let url = build_search_url("http://api.tvmaze.com/", "doctor who");
/// assert_eq!(url, "http://api.tvmaze.com/search/shows?q=doctor%20who");
/// ```
pub fn build_search_url(base: &str, term: &str) -> String {
    let encoded = urlencoding::encode(term);
    format!("{}search/shows?q={}", normalize_base(base), encoded)
}

/// Builds the episode list URL for a show
///
/// # Example
/// ```
/// use tvmaze_core::url::build_episodes_url;
/// let url = build_episodes_url("http://api.tvmaze.com/", 1767);
/// assert_eq!(url, "http://api.tvmaze.com/shows/1767/episodes");
/// ```
pub fn build_episodes_url(base: &str, show_id: u64) -> String {
    format!("{}shows/{}/episodes", normalize_base(base), show_id)
}

/// Unescaped concatenation, kept only to show what encoding protects against
#[cfg(test)]
pub(crate) fn build_search_url_unescaped(base: &str, term: &str) -> String {
    format!("{}search/shows?q={}", normalize_base(base), term)
}
