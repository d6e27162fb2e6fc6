use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::wire::{self, CreateUserRequest, CreateUserResponse, ListUsersResponse};
use super::RemoteUserService;
use crate::domain::{CreatedUser, NewUser, UserRecord};
use crate::error::RemoteError;

const API_KEY_HEADER: &str = "x-api-key";

/// [`RemoteUserService`] backed by the reqres.in REST API.
#[derive(Clone)]
pub struct ReqresClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for ReqresClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqresClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &!self.api_key.is_empty())
            .finish()
    }
}

impl ReqresClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Creating reqres client");

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_api_key(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(API_KEY_HEADER, &self.api_key)
    }

    /// Sends the request and decodes a 2xx body, mapping everything else to
    /// [`RemoteError`].
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RemoteError> {
        let response = self
            .with_api_key(request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return decode(response).await;
        }

        let body = response.text().await.unwrap_or_default();
        let message = wire::error_message(&body);
        warn!(status = status.as_u16(), message = ?message, "Request rejected");
        Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode(e.to_string()))
}

#[async_trait]
impl RemoteUserService for ReqresClient {
    #[instrument(skip(self))]
    async fn list_users(&self, page: u32) -> Result<Vec<UserRecord>, RemoteError> {
        debug!("Fetching users");
        let request = self
            .client
            .get(self.url("users"))
            .query(&[("page", page)]);

        let envelope: ListUsersResponse = self.execute(request).await.inspect_err(|e| {
            error!(error = %e, "Error fetching users");
        })?;

        info!(user_count = envelope.data.len(), "Fetched users");
        Ok(envelope.data.into_iter().map(UserRecord::from).collect())
    }

    #[instrument(fields(user_name = %user.name, job = %user.job), skip(self, user))]
    async fn create_user(&self, user: NewUser) -> Result<CreatedUser, RemoteError> {
        debug!("Creating user");
        let request = self
            .client
            .post(self.url("users"))
            .json(&CreateUserRequest::from(&user));

        let response: CreateUserResponse = self.execute(request).await.inspect_err(|e| {
            error!(error = %e, "Failed to create user");
        })?;

        let created = CreatedUser::from(response);
        info!(user_id = %created.id, "User created");
        Ok(created)
    }
}
