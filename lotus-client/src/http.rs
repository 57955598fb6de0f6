//! HTTP transport
//!
//! One reqwest client with the base URL and JSON headers. The bearer
//! token is attached from the shared [`SessionStore`]; a 401 triggers
//! exactly one token refresh and retry of the original request before
//! giving up, at which point the session is cleared.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use shared::error::ApiErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Token refresh endpoint, exempt from the refresh-on-401 decorator.
pub(crate) const TOKEN_REFRESH_PATH: &str = "api/auth/token/refresh/";

#[derive(serde::Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(serde::Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Transport trait - the verbs the typed API layer is built on
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
}

/// Network transport over reqwest
#[derive(Clone)]
pub struct RestTransport {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl RestTransport {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ClientResult<reqwest::Response> {
        let mut req = self.client.request(method.clone(), self.url(path));
        if let Some(token) = self.session.access_token().await {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }

    /// Exchange the refresh token for a new access token. Any failure
    /// here ends the session.
    async fn refresh_access_token(&self) -> ClientResult<()> {
        let Some(refresh) = self.session.refresh_token().await else {
            return Err(ClientError::Unauthorized("No session".into()));
        };

        let response = self
            .client
            .post(self.url(TOKEN_REFRESH_PATH))
            .json(&RefreshRequest { refresh: &refresh })
            .send()
            .await?;

        if !response.status().is_success() {
            self.session.clear().await;
            tracing::warn!("Token refresh rejected, session cleared");
            return Err(ClientError::Unauthorized("Session expired".into()));
        }

        let refreshed: RefreshResponse = response.json().await?;
        self.session.set_access_token(refreshed.access).await?;
        tracing::debug!("Access token refreshed");
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<T> {
        let mut response = self.send_once(&method, path, body.as_ref()).await?;

        // One refresh-and-retry per request; the refresh endpoint itself
        // is never retried. Without a refresh token the 401 passes
        // through untouched (some endpoints are public).
        if response.status() == StatusCode::UNAUTHORIZED
            && path != TOKEN_REFRESH_PATH
            && self.session.refresh_token().await.is_some()
        {
            self.refresh_access_token().await?;
            response = self.send_once(&method, path, body.as_ref()).await?;
        }

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body.preferred_message("Request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST => ClientError::Validation(message),
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            // 204 or empty body; only valid for () and Option targets
            return serde_json::from_slice(b"null").map_err(ClientError::from);
        }
        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(Method::POST, path, None).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, Some(body)).await
    }
}
