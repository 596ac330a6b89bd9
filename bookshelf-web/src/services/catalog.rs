//! Book catalog API client
//!
//! Wraps a Google-Books-style volumes API: free-text search plus volume
//! lookup by id. The base URL is configurable so tests can point the client
//! at a local stub server.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("Bookshelf/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Volume not found: {0}")]
    VolumeNotFound(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing field in catalog response: {0}")]
    MissingField(&'static str),
}

/// Search response: list of matching volumes
///
/// The API omits `items` entirely when nothing matches.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<Volume>>,
}

/// A single volume as returned by the catalog API
#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

/// Book detail extracted from a catalog volume
///
/// Title is required; authors are flattened to a single display string.
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub external_id: String,
    pub title: String,
    pub authors: String,
    pub cover_url: Option<String>,
    pub published_date: Option<String>,
}

impl Volume {
    fn into_detail(self) -> Result<BookDetail, CatalogError> {
        let info = self
            .volume_info
            .ok_or(CatalogError::MissingField("volumeInfo"))?;
        let title = info.title.ok_or(CatalogError::MissingField("title"))?;

        let authors = match info.authors {
            Some(authors) if !authors.is_empty() => authors.join(", "),
            _ => "Unknown author".to_string(),
        };

        Ok(BookDetail {
            external_id: self.id,
            title,
            authors,
            cover_url: info.image_links.and_then(|links| links.thumbnail),
            published_date: info.published_date,
        })
    }
}

/// Book catalog API client
#[derive(Clone)]
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Free-text volume search
    ///
    /// Volumes without a usable title are dropped from the result list.
    pub async fn search(&self, query: &str) -> Result<Vec<BookDetail>, CatalogError> {
        let url = format!("{}/volumes", self.base_url);

        tracing::debug!(query = %query, "Searching catalog API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(status.as_u16(), error_text));
        }

        let results: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let details: Vec<BookDetail> = results
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|volume| volume.into_detail().ok())
            .collect();

        tracing::info!(query = %query, matches = details.len(), "Catalog search complete");

        Ok(details)
    }

    /// Lookup a single volume by its catalog id
    pub async fn volume(&self, external_id: &str) -> Result<BookDetail, CatalogError> {
        let url = format!("{}/volumes/{}", self.base_url, external_id);

        tracing::debug!(external_id = %external_id, url = %url, "Querying catalog API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Err(CatalogError::VolumeNotFound(external_id.to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(status.as_u16(), error_text));
        }

        let volume: Volume = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let detail = volume.into_detail()?;

        tracing::info!(
            external_id = %external_id,
            title = %detail.title,
            "Retrieved volume from catalog"
        );

        Ok(detail)
    }
}
