//! WordPress REST API adapter.
//!
//! Talks to `<base>/posts` and `<base>/categories` on a `wp-json/wp/v2`
//! endpoint. Every request is bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::debug;

use super::{ContentSource, PostQuery, SourceError};
use crate::config::GatewayConfig;
use crate::domain::RawCategory;

/// WordPress REST client
pub struct WordPressSource {
    /// Base URL, e.g. `https://example.com/wp-json/wp/v2`
    base_url: String,
    /// Per-request timeout
    request_timeout: Duration,
    /// HTTP client
    client: reqwest::Client,
}

impl WordPressSource {
    /// Create a new WordPress source
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Create from config
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Build API URL
    fn api_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), resource)
    }

    /// GET a resource and decode its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = self.api_url(resource);
        debug!(%url, ?params, "GET");

        let request = async {
            let response = self
                .client
                .get(&url)
                .query(params)
                .send()
                .await
                .map_err(|e| SourceError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::Status {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }

            response
                .bytes()
                .await
                .map_err(|e| SourceError::Transport(e.to_string()))
        };

        let body = timeout(self.request_timeout, request)
            .await
            .map_err(|_| SourceError::Timeout(self.request_timeout))??;

        serde_json::from_slice(&body).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for WordPressSource {
    fn name(&self) -> &str {
        "wordpress"
    }

    async fn posts(&self, query: &PostQuery) -> Result<Vec<serde_json::Value>, SourceError> {
        self.get_json("posts", &query.to_params()).await
    }

    async fn categories(&self, slug: &str) -> Result<Vec<RawCategory>, SourceError> {
        self.get_json("categories", &[("slug", slug.to_string())])
            .await
    }
}
