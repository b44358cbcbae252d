//! HTTP implementation of [`CatalogProvider`] over the story backend's REST
//! API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::catalog::model::{CategoryRecord, StoryRecord};
use crate::catalog::{CatalogItem, CatalogProvider, CategoryItem};
use crate::error::GatewayError;

/// Thin typed client over the catalog read endpoints.
///
/// Holds no per-session state; one instance is shared read-only across all
/// open assistant sessions.
pub struct CatalogGateway {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogGateway {
    /// Create a gateway against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network {
                endpoint: base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { base_url, client })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// One GET round trip, decoded against the endpoint's schema.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        let url = self.endpoint_url(path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::Network {
                endpoint: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Server {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| GatewayError::Network {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| GatewayError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogProvider for CatalogGateway {
    async fn search_stories(&self, keyword: &str) -> Result<Vec<CatalogItem>, GatewayError> {
        let records: Vec<StoryRecord> = self
            .get_json("/stories/search", &[("keyword", keyword)])
            .await?;
        Ok(records.into_iter().map(CatalogItem::from).collect())
    }

    async fn trending_stories(&self) -> Result<Vec<CatalogItem>, GatewayError> {
        let records: Vec<StoryRecord> = self.get_json("/stories/hot", &[]).await?;
        Ok(records.into_iter().map(CatalogItem::from).collect())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryItem>, GatewayError> {
        let records: Vec<CategoryRecord> = self.get_json("/categories", &[]).await?;
        Ok(records.into_iter().map(CategoryItem::from).collect())
    }
}
