//! # Hosted Document Store Client
//!
//! [`BaasClient`] implements [`DocumentStore`] against the hosted backend's
//! REST API. Routes follow the backend's database/collection/document
//! hierarchy:
//!
//! ```text
//!   POST   {endpoint}/databases/{db}/collections/{col}/documents
//!   GET    {endpoint}/databases/{db}/collections/{col}/documents/{id}
//!   PATCH  {endpoint}/databases/{db}/collections/{col}/documents/{id}
//!   DELETE {endpoint}/databases/{db}/collections/{col}/documents/{id}
//!   GET    {endpoint}/databases/{db}/collections/{col}/documents
//! ```
//!
//! Authentication is the server API key plus the project id, sent as
//! headers on every request. Session-based auth belongs to the storefront
//! frontend and never passes through here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::BaasConfig;
use crate::error::{BaasError, BaasResult};
use crate::store::DocumentStore;

/// Response envelope for collection listings.
#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<Value>,
}

/// REST client for the hosted document store.
#[derive(Debug, Clone)]
pub struct BaasClient {
    http: reqwest::Client,
    endpoint: String,
    database_id: String,
}

impl BaasClient {
    /// Creates a client from configuration.
    pub fn new(config: &BaasConfig) -> BaasResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Project-Id",
            HeaderValue::from_str(&config.project_id)
                .map_err(|e| BaasError::Internal(format!("invalid project id header: {e}")))?,
        );
        headers.insert(
            "X-API-Key",
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| BaasError::Internal(format!("invalid api key header: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BaasError::Internal(format!("failed to build http client: {e}")))?;

        Ok(BaasClient {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    /// Maps non-success statuses to the error taxonomy.
    async fn check(response: Response, collection: &str, id: &str) -> BaasResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => BaasError::not_found(collection, id),
            StatusCode::CONFLICT => BaasError::conflict(collection, id),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                BaasError::Unauthorized(message)
            }
            StatusCode::TOO_MANY_REQUESTS => BaasError::RateLimited,
            _ => BaasError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl DocumentStore for BaasClient {
    async fn create(&self, collection: &str, id: &str, data: Value) -> BaasResult<Value> {
        debug!(collection, id, "creating document");

        let response = self
            .http
            .post(self.collection_url(collection))
            .json(&serde_json::json!({ "documentId": id, "data": data }))
            .send()
            .await?;

        let response = Self::check(response, collection, id).await?;
        response
            .json()
            .await
            .map_err(|e| BaasError::malformed(collection, e))
    }

    async fn get(&self, collection: &str, id: &str) -> BaasResult<Option<Value>> {
        let response = self
            .http
            .get(self.document_url(collection, id))
            .send()
            .await?;

        // Absence is not an error at this layer.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check(response, collection, id).await?;
        response
            .json()
            .await
            .map(Some)
            .map_err(|e| BaasError::malformed(collection, e))
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> BaasResult<Value> {
        debug!(collection, id, "updating document");

        let response = self
            .http
            .patch(self.document_url(collection, id))
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await?;

        let response = Self::check(response, collection, id).await?;
        response
            .json()
            .await
            .map_err(|e| BaasError::malformed(collection, e))
    }

    async fn delete(&self, collection: &str, id: &str) -> BaasResult<()> {
        debug!(collection, id, "deleting document");

        let response = self
            .http
            .delete(self.document_url(collection, id))
            .send()
            .await?;

        Self::check(response, collection, id).await?;
        Ok(())
    }

    async fn list(&self, collection: &str) -> BaasResult<Vec<Value>> {
        let response = self.http.get(self.collection_url(collection)).send().await?;

        let response = Self::check(response, collection, "").await?;
        let listing: DocumentList = response
            .json()
            .await
            .map_err(|e| BaasError::malformed(collection, e))?;

        Ok(listing.documents)
    }
}
