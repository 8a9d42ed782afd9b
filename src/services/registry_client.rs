//! Registry endpoint client
//!
//! Typed wrapper over the four operations of the registry endpoint. All of
//! them target the same base URL; the HTTP method selects the operation and
//! deletes carry the id in the query string.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::RegistryConfig;
use crate::models::{OrganizationFields, UpdateOrganizationRequest, YouthOrganization};

/// Failure of a registry request
#[derive(Debug, Error)]
pub enum RegistryClientError {
    /// The request never completed (connection refused, reset, DNS...)
    #[error("Registry request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Registry endpoint returned {status}")]
    Status { status: StatusCode },

    /// The endpoint answered 2xx with a body that is not a registry record
    #[error("Invalid registry response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The client could not be built
    #[error("Failed to build registry client: {0}")]
    Build(#[source] reqwest::Error),
}

impl RegistryClientError {
    /// Status code reported by the endpoint, if it answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RegistryClientError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryClientError>;

/// Operations the admin surface needs from the registry endpoint
#[async_trait]
pub trait RegistryEndpoint: Send + Sync {
    /// Fetch the whole collection
    async fn list(&self) -> RegistryResult<Vec<YouthOrganization>>;

    /// Create a record from its fields; the body never carries an id
    async fn create(&self, fields: &OrganizationFields) -> RegistryResult<()>;

    /// Overwrite every field of the record `id`
    async fn update(&self, id: i64, fields: &OrganizationFields) -> RegistryResult<()>;

    /// Remove the record `id`
    async fn delete(&self, id: i64) -> RegistryResult<()>;
}

/// reqwest-backed registry client
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
    endpoint_url: String,
}

impl RegistryClient {
    /// Create a client for the configured endpoint
    ///
    /// No request timeout is set: failures surface only as rejected
    /// requests or non-success statuses.
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(RegistryClientError::Build)?;

        Ok(Self::with_client(client, &config.endpoint_url))
    }

    /// Create a client reusing an existing reqwest client
    pub fn with_client(client: Client, endpoint_url: &str) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn send(&self, request: reqwest::RequestBuilder, operation: &str) -> RegistryResult<Response> {
        let response = request.send().await.map_err(|e| {
            error!(
                "Registry {} request to {} failed: {} (is_connect: {})",
                operation,
                self.endpoint_url,
                e,
                e.is_connect()
            );
            RegistryClientError::Transport(e)
        })?;

        let status = response.status();
        debug!("Registry {} answered {}", operation, status);

        if !status.is_success() {
            error!("Registry {} returned status {}", operation, status);
            return Err(RegistryClientError::Status { status });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> RegistryResult<T> {
        response.json::<T>().await.map_err(RegistryClientError::Decode)
    }
}

#[async_trait]
impl RegistryEndpoint for RegistryClient {
    async fn list(&self) -> RegistryResult<Vec<YouthOrganization>> {
        let response = self
            .send(self.client.get(&self.endpoint_url), "list")
            .await?;
        Self::decode(response).await
    }

    async fn create(&self, fields: &OrganizationFields) -> RegistryResult<()> {
        self.send(self.client.post(&self.endpoint_url).json(fields), "create")
            .await?;
        Ok(())
    }

    async fn update(&self, id: i64, fields: &OrganizationFields) -> RegistryResult<()> {
        let body = UpdateOrganizationRequest::new(id, fields.clone());
        self.send(self.client.put(&self.endpoint_url).json(&body), "update")
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> RegistryResult<()> {
        let url = format!("{}?id={}", self.endpoint_url, id);
        self.send(self.client.delete(&url), "delete").await?;
        Ok(())
    }
}
