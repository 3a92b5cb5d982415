//! High-level catalog API client
//!
//! Provides a convenient interface for fetching the product list.

use crate::config::ClientConfig;
use crate::error::CatalogError;
use crate::product::{CatalogPayload, decode_catalog};
use reqwest::Url;
use std::time::Duration;

/// High-level client for the catalog API
#[derive(Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ProductClient {
    /// Create a new client from the given endpoint configuration
    pub fn new(config: ClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_http(config, http)
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_http(config: ClientConfig, http: reqwest::Client) -> Result<Self, CatalogError> {
        let url = config.list_url();
        Url::parse(&url).map_err(|_| CatalogError::InvalidUrl(url.clone()))?;
        Ok(Self { http, config })
    }

    /// Full URL of the list endpoint
    pub fn list_url(&self) -> String {
        self.config.list_url()
    }

    /// Get the endpoint configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the full product catalog
    ///
    /// Makes a single attempt. A successful response may contain no products.
    pub async fn fetch_products(&self) -> Result<CatalogPayload, CatalogError> {
        let url = self.list_url();
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let payload = decode_catalog(&body)?;

        for rejected in &payload.rejected {
            tracing::warn!(
                "Skipping product record #{}: {}",
                rejected.index,
                rejected.reason
            );
        }
        tracing::info!(
            "Fetched {} products ({} rejected) from {}",
            payload.products.len(),
            payload.rejected.len(),
            url
        );

        Ok(payload)
    }

    /// Map transport errors to the more specific error kinds
    fn classify(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            CatalogError::Connection(err.to_string())
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Http(err)
        }
    }
}
