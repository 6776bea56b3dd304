use reqwest::Client;
use url::Url;

use super::error::OmdbError;
use super::types::{OmdbDetailResponse, OmdbSearchResponse};
use crate::traits::{CatalogService, MovieDetail, MovieSummary};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb HTTP client.
pub struct OmdbClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        let base_url = DEFAULT_BASE_URL
            .parse()
            .expect("default base URL is valid");
        Self::with_base_url(base_url, api_key)
    }

    /// Client from configured strings; fails on an invalid base URL.
    pub fn from_config(base_url: &str, api_key: &str) -> Result<Self, OmdbError> {
        let base_url = base_url
            .parse()
            .map_err(|e: url::ParseError| OmdbError::Parse(e.to_string()))?;
        Ok(Self::with_base_url(base_url, api_key.to_string()))
    }

    /// Client against a non-default endpoint (mirrors, tests).
    pub fn with_base_url(base_url: Url, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: Client::new(),
        }
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "OMDb API error");
            Err(OmdbError::Api {
                status,
                message: body,
            })
        }
    }
}

/// Settle a search body: body-level failure becomes an error, except for
/// "Movie not found!", which is an empty result set, not a failure.
fn settle_search(body: OmdbSearchResponse) -> Result<Vec<MovieSummary>, OmdbError> {
    if body.response != "True" {
        let message = body
            .error
            .unwrap_or_else(|| "unknown catalog error".to_string());
        if message == "Movie not found!" {
            return Ok(Vec::new());
        }
        tracing::warn!(%message, "OMDb search rejected");
        return Err(OmdbError::Catalog(message));
    }
    Ok(body.search.into_iter().map(|i| i.into_summary()).collect())
}

fn settle_detail(body: OmdbDetailResponse) -> Result<MovieDetail, OmdbError> {
    if body.response != "True" {
        let message = body
            .error
            .unwrap_or_else(|| "unknown catalog error".to_string());
        tracing::warn!(%message, "OMDb detail lookup rejected");
        return Err(OmdbError::Catalog(message));
    }
    Ok(body.into_detail())
}

impl CatalogService for OmdbClient {
    type Error = OmdbError;

    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, OmdbError> {
        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: OmdbSearchResponse = resp
            .json()
            .await
            .map_err(|e| OmdbError::Parse(e.to_string()))?;

        settle_search(body)
    }

    async fn get_detail(&self, imdb_id: &str) -> Result<MovieDetail, OmdbError> {
        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str()), ("i", imdb_id)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: OmdbDetailResponse = resp
            .json()
            .await
            .map_err(|e| OmdbError::Parse(e.to_string()))?;

        settle_detail(body)
    }
}
