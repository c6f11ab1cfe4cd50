//! HTTP client for the feature board API.
//!
//! Configuration is via environment variables:
//! - `FEATURE_BOARD_URL` - Server base URL (default: `http://127.0.0.1:5000`)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::models::*;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the `/api/features` surface.
#[derive(Debug, Clone)]
pub struct FeatureClient {
    base_url: String,
    client: Client,
}

impl FeatureClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env().base_url)
    }

    /// Create with an explicit server URL, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        self.client.request(method, &url)
    }

    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
            _ => ClientError::Server(format!("{}: {}", status, body)),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    /// Handle response that carries no body (204 No Content).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        self.handle_empty_response(response).await
    }

    /// Fetch the full ordered collection.
    pub async fn list_features(&self) -> Result<Vec<Feature>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/features")
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn create_feature(&self, input: &CreateFeatureInput) -> Result<Feature, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/features")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn update_feature(
        &self,
        id: Uuid,
        input: &UpdateFeatureInput,
    ) -> Result<Feature, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/features/{}", id))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn delete_feature(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/features/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
