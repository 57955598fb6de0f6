//! Typed API surface
//!
//! One trait per backend concern so view controllers depend only on
//! what they call and tests can mock the seam without a socket.
//! [`RestApi`] implements all of them over [`RestTransport`].

mod auth;
mod billing;
mod bookings;
mod notifications;
mod query;
mod rooms;
mod stats;
mod users;

pub use auth::AuthApi;
pub use billing::{InvoiceApi, PaymentApi};
pub use bookings::{BookingApi, CheckoutApi};
pub use notifications::NotificationApi;
pub use query::{PageQuery, QueryString, UserQuery};
pub use rooms::RoomApi;
pub use stats::StatsApi;
pub use users::UserAdminApi;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::RestTransport;
use crate::session::SessionStore;

/// REST implementation of every API trait
#[derive(Clone)]
pub struct RestApi {
    transport: RestTransport,
}

impl RestApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = match &config.session_dir {
            Some(dir) => Arc::new(SessionStore::load(dir)),
            None => Arc::new(SessionStore::in_memory()),
        };
        Ok(Self {
            transport: RestTransport::new(config, session)?,
        })
    }

    pub fn with_transport(transport: RestTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &RestTransport {
        &self.transport
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.transport.session()
    }
}
