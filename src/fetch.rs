// HTTP client for the movie API. One list read and one detail read; no retries.
// On wasm32 reqwest rides on the browser's fetch, so this runs unchanged in the page.

use reqwest::Client;

use crate::error::EngineError;
use crate::store::{parse_catalog, parse_movie};
use crate::types::*;

const MOVIES_PATH: &str = "/api/movies";

/// Client for the external movie API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for `base_url` (scheme and host, optional path prefix).
    pub fn new(base_url: &str) -> Result<Self, EngineError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(EngineError::InvalidConfig(
                "api_base_url cannot be empty".to_string(),
            ));
        }
        Ok(CatalogClient {
            client: Client::new(),
            base_url: base_url.to_string(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, EngineError> {
        Self::new(&config.api_base_url)
    }

    /// URL of the movie list endpoint.
    pub fn movies_url(&self) -> String {
        format!("{}{}", self.base_url, MOVIES_PATH)
    }

    /// URL of a single movie's detail endpoint.
    pub fn movie_url(&self, id: &MovieId) -> String {
        format!("{}{}/{}", self.base_url, MOVIES_PATH, id)
    }

    /// Fetch the full catalog.
    pub async fn fetch_catalog(&self) -> Result<Catalog, EngineError> {
        let body = self.fetch_catalog_body().await?;
        parse_catalog(&body)
    }

    /// Fetch the movie list response body without parsing it.
    pub async fn fetch_catalog_body(&self) -> Result<String, EngineError> {
        let url = self.movies_url();
        tracing::debug!(url = %url, "Fetching movie catalog");
        self.get_text(&url).await
    }

    /// Fetch one movie by id. `None` when the API has no such movie.
    pub async fn fetch_movie(&self, id: &MovieId) -> Result<Option<Movie>, EngineError> {
        let url = self.movie_url(id);
        tracing::debug!(movie_id = %id, "Fetching movie details");
        let body = self.get_text(&url).await?;
        parse_movie(&body)
    }

    async fn get_text(&self, url: &str) -> Result<String, EngineError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Movie API request failed");
            return Err(EngineError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
