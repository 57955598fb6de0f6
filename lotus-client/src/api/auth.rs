//! Authentication endpoints

use async_trait::async_trait;
use shared::models::User;

use super::RestApi;
use crate::error::ClientResult;
use crate::http::Transport;
use crate::session::TokenPair;

#[derive(serde::Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(serde::Serialize)]
struct LogoutRequest<'a> {
    refresh: &'a str,
}

/// Session lifecycle against the token endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Obtain a token pair and install it in the session store.
    async fn login(&self, username: &str, password: &str) -> ClientResult<()>;

    /// Profile of the authenticated user.
    async fn current_user(&self) -> ClientResult<User>;

    /// Blacklist the refresh token and drop the session. The session is
    /// cleared even when the blacklist call fails.
    async fn logout(&self) -> ClientResult<()>;
}

#[async_trait]
impl AuthApi for RestApi {
    async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let pair: TokenPair = self
            .transport
            .post("api/auth/token/", &LoginRequest { username, password })
            .await?;
        self.session().set_tokens(pair).await?;
        tracing::debug!(username = %username, "Logged in");
        Ok(())
    }

    async fn current_user(&self) -> ClientResult<User> {
        self.transport.get("users/profile/").await
    }

    async fn logout(&self) -> ClientResult<()> {
        if let Some(refresh) = self.session().refresh_token().await {
            let result: ClientResult<serde_json::Value> = self
                .transport
                .post("api/auth/token/blacklist/", &LogoutRequest { refresh: &refresh })
                .await;
            if let Err(e) = result {
                tracing::warn!("Token blacklist failed during logout: {}", e);
            }
        }
        self.session().clear().await;
        Ok(())
    }
}
