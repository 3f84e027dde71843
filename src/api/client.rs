//! HTTP implementation of [`PokeApi`] backed by reqwest

use super::errors::{LoadFailure, LoadResult};
use super::types::{ItemDetail, ListingPage, RawDetail, RawListing};
use super::PokeApi;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// PokéAPI client talking to the configured listing endpoint
pub struct HttpPokeApi {
    client: Client,
    base_url: String,
}

impl HttpPokeApi {
    /// Create a client from the application configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());

        // No timeout unless configured; the transport default applies
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> LoadResult<T> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadFailure::status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PokeApi for HttpPokeApi {
    async fn fetch_listing(&self, offset: u32, limit: u32) -> LoadResult<ListingPage> {
        debug!("GET {}?offset={}&limit={}", self.base_url, offset, limit);

        let request = self
            .client
            .get(&self.base_url)
            .query(&[("offset", offset), ("limit", limit)]);

        let raw: RawListing = self.get_json(request).await?;
        Ok(raw.into())
    }

    async fn fetch_detail(&self, detail_url: &str) -> LoadResult<ItemDetail> {
        debug!("GET {}", detail_url);

        let raw: RawDetail = self.get_json(self.client.get(detail_url)).await?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = Config {
            base_url: "http://localhost:9/api/v2/pokemon".to_string(),
            request_timeout_secs: Some(5),
            ..Config::default()
        };

        let api = HttpPokeApi::new(&config).unwrap();
        assert_eq!(api.base_url, "http://localhost:9/api/v2/pokemon");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_load_failure() {
        // Nothing listens on the discard port
        let config = Config {
            base_url: "http://127.0.0.1:9/api/v2/pokemon".to_string(),
            request_timeout_secs: Some(2),
            ..Config::default()
        };
        let api = HttpPokeApi::new(&config).unwrap();

        let error = api.fetch_listing(0, 20).await.unwrap_err();
        assert!(matches!(error, LoadFailure::Http(_)));
        assert!(error.to_string().starts_with("HTTP Error: "));
    }
}
