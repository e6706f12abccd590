//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; every response is wrapped in a
//!   `{ success, data, error }` envelope
//! - Search and category filters go to the server, availability filtering
//!   and sorting happen locally in [`CatalogQuery::apply`]
//! - In-memory caching via `moka` for listings (5 minute TTL), dropped after
//!   a successful add
//!
//! # Example
//!
//! ```rust,ignore
//! use urvann_storefront::catalog::{CatalogClient, CatalogQuery};
//!
//! let client = CatalogClient::new(&config.api)?;
//! let plants = client.list_plants(&CatalogQuery::default()).await?;
//! let categories = client.list_categories().await;
//! ```

mod cache;
pub mod form;
pub mod query;
pub mod types;

pub use form::{PlantField, PlantForm, PlantFormError};
pub use query::{AvailabilityFilter, CatalogQuery, CatalogSummary, SortOrder};
pub use types::{ALL_CATEGORIES, DEFAULT_CATEGORIES, NewPlant, Plant};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

use urvann_core::ItemId;

use crate::config::ApiConfig;
use cache::{CacheKey, CacheValue};
use types::ApiEnvelope;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request did not complete within the configured timeout.
    #[error("Request timeout. Server is taking too long to respond.")]
    Timeout,

    /// The API answered 404.
    #[error("API endpoint not found. Check your server URL.")]
    EndpointNotFound,

    /// The API answered with a 5xx status.
    #[error("Server error. Please try again later.")]
    Server(StatusCode),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API reported a failure, or the envelope was unusable.
    #[error("{0}")]
    Api(String),

    /// Request data could not be encoded.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The image to upload could not be read.
    #[error("Could not read image: {0}")]
    Image(#[from] std::io::Error),
}

fn transport_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        warn!("Request timeout - server may be slow");
        CatalogError::Timeout
    } else {
        CatalogError::Http(e)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the plant catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and unwrap the response envelope.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Option<Value>, CatalogError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::EndpointNotFound);
        }
        if status.is_server_error() {
            return Err(CatalogError::Server(status));
        }

        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| {
                    format!("Request failed with status code {}", status.as_u16())
                });
            return Err(CatalogError::Api(message));
        }

        match serde_json::from_str::<ApiEnvelope>(&body) {
            Ok(envelope) if envelope.success => Ok(envelope.data),
            Ok(envelope) => Err(CatalogError::Api(
                envelope
                    .error
                    .unwrap_or_else(|| "Invalid response format".to_string()),
            )),
            Err(e) => {
                debug!(error = %e, "Response body is not an API envelope");
                Err(CatalogError::Api("Invalid response format".to_string()))
            }
        }
    }

    // =========================================================================
    // Plant Methods
    // =========================================================================

    /// Fetch plants matching `query`.
    ///
    /// Search text and category are sent to the server; the result is then
    /// filtered and sorted locally by `query`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the API reports failure.
    #[instrument(skip(self))]
    pub async fn list_plants(&self, query: &CatalogQuery) -> Result<Vec<Plant>, CatalogError> {
        let key = CacheKey::Plants {
            search: query.search_term().map(str::to_string),
            category: query.category_filter().map(str::to_string),
        };

        if let Some(CacheValue::Plants(plants)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for plants");
            return Ok(query.apply(&plants));
        }

        let mut url = self.endpoint("plants")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(search) = query.search_term() {
                pairs.append_pair("search", search);
            }
            if let Some(category) = query.category_filter() {
                pairs.append_pair("category", category);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        debug!(url = %url, "Fetching plants");
        let data = self.execute(self.inner.client.get(url)).await?;

        let plants: Vec<Plant> = match data {
            Some(Value::Array(items)) => items.iter().map(Plant::from_raw).collect(),
            _ => Vec::new(),
        };
        info!(count = plants.len(), "Loaded plants");

        self.inner
            .cache
            .insert(key, CacheValue::Plants(plants.clone()))
            .await;

        Ok(query.apply(&plants))
    }

    /// Look up one plant by id in the full listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the listing cannot be fetched.
    #[instrument(skip(self))]
    pub async fn find_plant(&self, id: &ItemId) -> Result<Option<Plant>, CatalogError> {
        let plants = self.list_plants(&CatalogQuery::default()).await?;
        Ok(plants.into_iter().find(|plant| plant.id == *id))
    }

    /// Fetch category labels.
    ///
    /// Never fails: if the request fails or yields no usable labels, the
    /// default category list is returned instead.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Vec<String> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return categories;
        }

        match self.fetch_categories().await {
            Ok(categories) if !categories.is_empty() => {
                info!(count = categories.len(), "Loaded categories");
                self.inner
                    .cache
                    .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
                    .await;
                categories
            }
            Ok(_) => default_categories(),
            Err(e) => {
                warn!(error = %e, "Failed to fetch categories, using defaults");
                default_categories()
            }
        }
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint("categories")?;
        let data = self.execute(self.inner.client.get(url)).await?;

        Ok(match data {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|label| !label.trim().is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Create a plant.
    ///
    /// Sent as multipart form data, with categories JSON-encoded and the
    /// image (if any) attached as a file part. Cached listings are dropped on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the image cannot be read, the request fails,
    /// or the API rejects the plant.
    #[instrument(skip(self, plant), fields(name = %plant.name))]
    pub async fn add_plant(&self, plant: &NewPlant) -> Result<(), CatalogError> {
        let mut form = Form::new()
            .text("name", plant.name.clone())
            .text("price", plant.price.amount().to_string())
            .text("description", plant.description.clone())
            .text("stockCount", plant.stock_count.to_string())
            .text("availability", plant.availability.to_string())
            .text("categories", serde_json::to_string(&plant.categories)?);

        if let Some(path) = &plant.image {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        }

        let url = self.endpoint("plants")?;
        self.execute(self.inner.client.post(url).multipart(form))
            .await?;
        info!("Plant added");

        self.invalidate_all();
        Ok(())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop every cached listing.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| (*c).to_string()).collect()
}
