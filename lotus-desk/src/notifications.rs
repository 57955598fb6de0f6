//! Unread notification badge poller
//!
//! One background task per signed-in user, polling the unread counter
//! once a minute and publishing it on a watch channel. Dropping the
//! poller aborts the task, so switching users can never leave a stray
//! poll loop behind.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use lotus_client::api::NotificationApi;

pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

pub struct NotificationPoller {
    rx: watch::Receiver<u64>,
    handle: JoinHandle<()>,
}

impl NotificationPoller {
    /// Start polling. The first fetch happens immediately, then every
    /// [`POLL_INTERVAL`]. A failed poll keeps the last published count.
    pub fn start<A>(api: Arc<A>) -> Self
    where
        A: NotificationApi + 'static,
    {
        let (tx, rx) = watch::channel(0u64);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            loop {
                ticker.tick().await;
                match api.unread_count().await {
                    Ok(count) => {
                        if tx.send(count).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "Unread notification poll failed");
                    }
                }
            }
        });
        Self { rx, handle }
    }

    pub fn unread(&self) -> u64 {
        *self.rx.borrow()
    }

    /// Receiver for UI code that wants change notifications instead of
    /// polling [`Self::unread`] every frame.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.rx.clone()
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
