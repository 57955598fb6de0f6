//! HTTP client for the Lotus hotel platform backend
//!
//! The backend owns every business rule; this crate is the transport
//! and the typed surface over it. It provides the session/token store,
//! a reqwest-based transport with bearer attachment and a single
//! refresh-on-401 retry, and per-concern API traits implemented by
//! [`RestApi`]. The traits are the seam the view layer mocks in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::{
    AuthApi, BookingApi, CheckoutApi, InvoiceApi, NotificationApi, PaymentApi, RestApi, StatsApi,
    UserAdminApi,
};
pub use api::{PageQuery, RoomApi, UserQuery};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use crate::http::{RestTransport, Transport};
pub use session::{SessionStore, TokenPair};
