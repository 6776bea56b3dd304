//! Wire types for OMDb responses.
//!
//! OMDb signals failure in the body (`Response: "False"` plus an `Error`
//! message) rather than with HTTP status codes, and renders every absent
//! field as the literal string `"N/A"`.

use serde::Deserialize;

use crate::traits::{MovieDetail, MovieSummary};

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl OmdbSearchItem {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: non_na(self.poster),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
}

impl OmdbDetailResponse {
    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: non_na(self.poster),
            runtime_minutes: parse_runtime(&self.runtime),
            genre: self.genre,
            director: self.director,
            actors: self.actors,
            plot: self.plot,
            imdb_rating: parse_rating(&self.imdb_rating),
        }
    }
}

/// Map OMDb's `"N/A"` placeholder (and empty strings) to `None`.
fn non_na(value: String) -> Option<String> {
    if value.is_empty() || value == "N/A" {
        None
    } else {
        Some(value)
    }
}

/// Parse a runtime like `"148 min"` into minutes.
fn parse_runtime(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}

/// Parse a rating like `"8.8"`; `"N/A"` yields `None`.
fn parse_rating(value: &str) -> Option<f32> {
    value.parse().ok()
}
