//! Access to the storefront REST backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use storefront_core::{CategoryKey, ProductId};
use storefront_products::{Comment, Product, RatingSummary};

use crate::config::StorefrontConfig;
use crate::error::FetchError;

/// `/comments/{category}` document: product id → comments.
pub type CommentDocument = HashMap<ProductId, Vec<Comment>>;

/// The endpoints the storefront pages read from.
///
/// Requests are never retried; callers decide how a failure degrades.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    /// Origin that relative image paths resolve against.
    fn origin(&self) -> &Url;

    /// `GET /products`: every product, tagged with its category key.
    async fn all_products(&self) -> Result<Vec<Product>, FetchError>;

    /// `GET /products/{category}`.
    async fn category_products(&self, category: &CategoryKey) -> Result<Vec<Product>, FetchError>;

    /// `GET /comments/{category}`.
    async fn category_comments(&self, category: &CategoryKey) -> Result<CommentDocument, FetchError>;

    /// `GET /rating-summary/{category}/{id}`; `Ok(None)` on 404.
    async fn rating_summary(
        &self,
        category: &CategoryKey,
        product_id: &ProductId,
    ) -> Result<Option<RatingSummary>, FetchError>;

    /// `GET /rating-summary?flat=true`.
    async fn flat_rating_summaries(&self) -> Result<HashMap<ProductId, RatingSummary>, FetchError>;
}

/// [`StorefrontBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    origin: Url,
}

impl HttpBackend {
    pub fn new(api_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut origin =
            Url::parse(api_url.trim()).map_err(|e| FetchError::InvalidUrl(format!("{api_url}: {e}")))?;
        if origin.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!("{api_url}: not a base url")));
        }
        // Relative joins need a trailing slash on the base path.
        if !origin.path().ends_with('/') {
            let path = format!("{}/", origin.path());
            origin.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, origin })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, FetchError> {
        Self::new(&config.api_url, config.http_timeout)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.origin.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.origin.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode JSON; a 404 comes back as `Ok(None)`.
    async fn get_optional_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "backend returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| FetchError::Parse(format!("{url}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        self.get_optional_json(url)
            .await?
            .ok_or(FetchError::Status(404))
    }
}

#[async_trait]
impl StorefrontBackend for HttpBackend {
    fn origin(&self) -> &Url {
        &self.origin
    }

    async fn all_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json(self.endpoint(&["products"])?).await
    }

    async fn category_products(&self, category: &CategoryKey) -> Result<Vec<Product>, FetchError> {
        self.get_json(self.endpoint(&["products", category.as_str()])?)
            .await
    }

    async fn category_comments(&self, category: &CategoryKey) -> Result<CommentDocument, FetchError> {
        self.get_json(self.endpoint(&["comments", category.as_str()])?)
            .await
    }

    async fn rating_summary(
        &self,
        category: &CategoryKey,
        product_id: &ProductId,
    ) -> Result<Option<RatingSummary>, FetchError> {
        self.get_optional_json(self.endpoint(&[
            "rating-summary",
            category.as_str(),
            product_id.as_str(),
        ])?)
        .await
    }

    async fn flat_rating_summaries(&self) -> Result<HashMap<ProductId, RatingSummary>, FetchError> {
        let mut url = self.endpoint(&["rating-summary"])?;
        url.query_pairs_mut().append_pair("flat", "true");
        self.get_json(url).await
    }
}
