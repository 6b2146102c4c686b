//! Normalization of upstream catalog records
//!
//! The raw response shapes live here and nowhere else. Each entity kind has
//! one total mapping function into the types in [`crate::types`].

pub mod episode;
pub mod show;

pub use episode::{RawEpisode, normalize_episode, normalize_episodes};
pub use show::{ImageDescriptor, RawSearchResult, RawShow, normalize_search_results, normalize_show};
