//! Trait definitions for movie catalog services.
//!
//! The OMDb client implements this trait; the core state machines are
//! written against it, so tests can substitute a scripted catalog.

use std::future::Future;

/// A free-text movie catalog interface.
///
/// Both operations are single-shot request/response: no caching, no retry.
/// A failed attempt surfaces immediately as an error to the caller;
/// cancellation of superseded calls is handled by the caller.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search the catalog by free-text title.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<MovieSummary>, Self::Error>> + Send;

    /// Fetch the full record for one title.
    fn get_detail(
        &self,
        imdb_id: &str,
    ) -> impl Future<Output = Result<MovieDetail, Self::Error>> + Send;
}

/// One search hit. Immutable once fetched; lives as long as its result set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
}

/// A full movie record, fetched on demand when a title is selected.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub plot: String,
    pub imdb_rating: Option<f32>,
}
