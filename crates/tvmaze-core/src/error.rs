//! Error types for the TVmaze show finder
//!
//! Network failures and normalization gaps are the two failure kinds the
//! catalog operations surface. The remaining variants belong to the page
//! side (locating handles, resolving click targets).

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all catalog, rendering and controller operations
///
/// Implements Display for human-readable messages and Serialize
/// for Tauri command compatibility.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("Catalog returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Response body did not match the expected upstream shape
    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    /// Upstream episode record lacks a field the normalized model requires
    #[error("Episode {episode} is missing required field `{field}`")]
    NormalizationGap { episode: String, field: &'static str },

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Expected page element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Event target does not resolve to a rendered show
    #[error("Invalid event target: {0}")]
    InvalidTarget(String),
}

impl CatalogError {
    /// Whether this error is a network error (transport or non-success status)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. })
    }
}

impl Serialize for CatalogError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
