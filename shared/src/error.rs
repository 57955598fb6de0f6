//! Server error body
//!
//! HTTP error responses carry at most one of `detail`, `message`, `error`.
//! No structured codes are parsed beyond presence; extraction follows a
//! fixed precedence.

use serde::{Deserialize, Serialize};

/// Error payload as produced by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Most specific available field: `detail`, then `message`, then
    /// `error`, then the caller's fallback.
    pub fn preferred_message(&self, fallback: &str) -> String {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error.as_deref())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.detail.is_none() && self.message.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_message_and_error() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail": "d", "message": "m", "error": "e"}"#,
        )
        .unwrap();
        assert_eq!(body.preferred_message("fallback"), "d");
    }

    #[test]
    fn message_wins_over_error() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "m", "error": "e"}"#).unwrap();
        assert_eq!(body.preferred_message("fallback"), "m");
    }

    #[test]
    fn fallback_when_empty() {
        let body = ApiErrorBody::default();
        assert!(body.is_empty());
        assert_eq!(body.preferred_message("fallback"), "fallback");
    }
}
