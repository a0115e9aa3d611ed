//! HTTP client for the remote user directory.
//!
//! Every call is a single attempt: no retries, no backoff, no cancellation.
//! Failures are normalized into [`ClientError`] so front ends only have to
//! decide how to present them.

use crate::config::ClientConfig;
use crate::models::{
    ApiErrorBody, ClientError, Credentials, LoginResponse, UpdatedUser, UserPage, UserUpdate,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-api-key";

/// Operations the directory views need from the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait UserDirectoryApi {
    /// Exchange credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError>;

    /// Fetch one page of users.
    async fn list_users(&self, page: u32) -> Result<UserPage, ClientError>;

    /// Send edited fields for `id`; returns the fields the service echoed back.
    async fn update_user(&self, id: u64, update: &UserUpdate)
    -> Result<UpdatedUser, ClientError>;

    /// Delete `id` on the service.
    async fn delete_user(&self, id: u64) -> Result<(), ClientError>;
}

/// `reqwest`-backed [`UserDirectoryApi`] used by the web and terminal clients.
#[derive(Clone, Debug)]
pub struct DirectoryClient {
    config: ClientConfig,
    client: Client,
    token: Option<String>,
}

impl DirectoryClient {
    /// Create a new API client for the configured base URL.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            token: None,
        }
    }

    /// Attach a bearer token to every subsequent request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Replaces the bearer token sent with later requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!(%method, %url, "directory request");
        let mut request = self.client.request(method, url);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

async fn error_message(response: Response) -> Option<String> {
    response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
}

#[async_trait(?Send)]
impl UserDirectoryApi for DirectoryClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let response = self
            .request(Method::POST, "login")
            .json(credentials)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "login request failed");
                ClientError::auth(None)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            warn!(%status, message = ?message, "login rejected");
            return Err(ClientError::auth(message));
        }

        response.json::<LoginResponse>().await.map_err(|err| {
            warn!(error = %err, "login response was not understood");
            ClientError::auth(None)
        })
    }

    async fn list_users(&self, page: u32) -> Result<UserPage, ClientError> {
        let fetch_error = |reason: String| {
            warn!(page, %reason, "listing users failed");
            ClientError::Fetch { page, reason }
        };

        let response = self
            .request(Method::GET, "users")
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|err| fetch_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("server answered {status}")));
        }

        response
            .json::<UserPage>()
            .await
            .map_err(|err| fetch_error(err.to_string()))
    }

    async fn update_user(
        &self,
        id: u64,
        update: &UserUpdate,
    ) -> Result<UpdatedUser, ClientError> {
        let update_error = |reason: String| {
            warn!(id, %reason, "updating user failed");
            ClientError::Update { id, reason }
        };

        let response = self
            .request(Method::PUT, &format!("users/{id}"))
            .json(update)
            .send()
            .await
            .map_err(|err| update_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(update_error(format!("server answered {status}")));
        }

        response
            .json::<UpdatedUser>()
            .await
            .map_err(|err| update_error(err.to_string()))
    }

    async fn delete_user(&self, id: u64) -> Result<(), ClientError> {
        let delete_error = |reason: String| {
            warn!(id, %reason, "deleting user failed");
            ClientError::Delete { id, reason }
        };

        let response = self
            .request(Method::DELETE, &format!("users/{id}"))
            .send()
            .await
            .map_err(|err| delete_error(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(delete_error(format!("server answered {status}")))
        }
    }
}
