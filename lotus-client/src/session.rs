//! Session store
//!
//! Holds the bearer token pair for the logged-in user and optionally
//! persists it to `{dir}/session.json` so a restarted client resumes
//! its session. Tokens are opaque; only the JWT `exp` claim is peeked
//! for expiry reporting.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ClientResult;

/// Access/refresh token pair as issued by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    /// Unix timestamp of the access token's `exp` claim, if it parses
    /// as a JWT. Format: header.payload.signature, base64url payload.
    pub fn access_expires_at(&self) -> Option<u64> {
        parse_jwt_exp(&self.access)
    }
}

fn parse_jwt_exp(token: &str) -> Option<u64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    payload.get("exp")?.as_u64()
}

/// Session store shared between the application and the transport
pub struct SessionStore {
    /// `{dir}/session.json`; in-memory only when absent.
    file_path: Option<PathBuf>,
    tokens: RwLock<Option<TokenPair>>,
}

impl SessionStore {
    /// In-memory store, nothing touches disk.
    pub fn in_memory() -> Self {
        Self {
            file_path: None,
            tokens: RwLock::new(None),
        }
    }

    /// Store backed by `{dir}/session.json`, loading any persisted
    /// session. An unreadable or corrupt file is treated as no session.
    pub fn load(dir: &std::path::Path) -> Self {
        let file_path = dir.join("session.json");
        let tokens = std::fs::read_to_string(&file_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok());
        if tokens.is_some() {
            tracing::debug!(path = %file_path.display(), "Loaded persisted session");
        }
        Self {
            file_path: Some(file_path),
            tokens: RwLock::new(tokens),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.access.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.refresh.clone())
    }

    /// Install a new token pair (after login or refresh) and persist it.
    pub async fn set_tokens(&self, pair: TokenPair) -> ClientResult<()> {
        if let Some(path) = &self.file_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_string_pretty(&pair)?)?;
        }
        *self.tokens.write().await = Some(pair);
        Ok(())
    }

    /// Replace only the access token, keeping the refresh token.
    pub async fn set_access_token(&self, access: String) -> ClientResult<()> {
        let updated = {
            let guard = self.tokens.read().await;
            guard.as_ref().map(|t| TokenPair {
                access,
                refresh: t.refresh.clone(),
            })
        };
        match updated {
            Some(pair) => self.set_tokens(pair).await,
            None => Ok(()),
        }
    }

    /// Drop the session, both in memory and on disk.
    pub async fn clear(&self) {
        *self.tokens.write().await = None;
        if let Some(path) = &self.file_path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), "Failed to remove session file: {}", e);
                }
            }
        }
        tracing::debug!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use tempfile::TempDir;

    fn fake_jwt(exp: u64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("{header}.{payload}.sig")
    }

    #[tokio::test]
    async fn persists_and_reloads_tokens() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::load(dir.path());
        assert!(!store.is_authenticated().await);

        store
            .set_tokens(TokenPair {
                access: "a1".into(),
                refresh: "r1".into(),
            })
            .await
            .unwrap();

        let reloaded = SessionStore::load(dir.path());
        assert_eq!(reloaded.access_token().await.as_deref(), Some("a1"));
        assert_eq!(reloaded.refresh_token().await.as_deref(), Some("r1"));

        reloaded.clear().await;
        let cleared = SessionStore::load(dir.path());
        assert!(!cleared.is_authenticated().await);
    }

    #[tokio::test]
    async fn set_access_token_keeps_refresh() {
        let store = SessionStore::in_memory();
        store
            .set_tokens(TokenPair {
                access: "old".into(),
                refresh: "r".into(),
            })
            .await
            .unwrap();
        store.set_access_token("new".into()).await.unwrap();
        assert_eq!(store.access_token().await.as_deref(), Some("new"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("r"));
    }

    #[test]
    fn jwt_exp_is_extracted() {
        let pair = TokenPair {
            access: fake_jwt(1_900_000_000),
            refresh: "r".into(),
        };
        assert_eq!(pair.access_expires_at(), Some(1_900_000_000));
    }

    #[test]
    fn opaque_token_has_no_exp() {
        let pair = TokenPair {
            access: "not-a-jwt".into(),
            refresh: "r".into(),
        };
        assert_eq!(pair.access_expires_at(), None);
    }
}
