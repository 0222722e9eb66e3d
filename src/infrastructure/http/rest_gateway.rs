//! REST gateway over the remote User resource

use std::time::Duration;

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::domain::user::{User, UserDraft, UserGateway, UserId};
use crate::domain::DomainError;

/// `UserGateway` over the remote REST surface:
/// `GET /users`, `POST /users`, `PUT /users/{id}`, `DELETE /users/{id}`,
/// JSON bodies on writes. Any non-2xx status is a transport error; this
/// layer performs no retries.
#[derive(Debug, Clone)]
pub struct RestUserGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RestUserGateway {
    /// Build a gateway against the configured base URL. The configured
    /// timeout applies to every call; there is no per-call override.
    pub fn new(config: &RemoteConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| DomainError::transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn record_url(&self, id: UserId) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DomainError::transport_status(
            status.as_u16(),
            format!("HTTP {}: {}", status, body),
        ))
    }
}

fn request_failed(err: reqwest::Error) -> DomainError {
    DomainError::transport(format!("request failed: {err}"))
}

fn decode_failed(err: reqwest::Error) -> DomainError {
    DomainError::transport(format!("failed to parse response: {err}"))
}

#[async_trait]
impl UserGateway for RestUserGateway {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(request_failed)?;

        let response = Self::ensure_success(response).await?;
        response.json().await.map_err(decode_failed)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, DomainError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(request_failed)?;

        let response = Self::ensure_success(response).await?;
        response.json().await.map_err(decode_failed)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, DomainError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(draft)
            .send()
            .await
            .map_err(request_failed)?;

        let response = Self::ensure_success(response).await?;
        response.json().await.map_err(decode_failed)
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(request_failed)?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
