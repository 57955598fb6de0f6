//! Notification endpoints

use async_trait::async_trait;
use shared::ListResponse;
use shared::models::{Notification, UnreadCount};

use super::RestApi;
use crate::error::ClientResult;
use crate::http::Transport;

#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Unread counter polled by the header badge.
    async fn unread_count(&self) -> ClientResult<u64>;

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>>;
}

#[async_trait]
impl NotificationApi for RestApi {
    async fn unread_count(&self) -> ClientResult<u64> {
        let unread: UnreadCount = self.transport.get("notifications/unread/").await?;
        Ok(unread.count)
    }

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        let list: ListResponse<Notification> = self.transport.get("notifications/").await?;
        Ok(list.into_items())
    }
}
