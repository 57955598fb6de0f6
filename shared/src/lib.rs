//! Shared types for the Lotus hotel platform
//!
//! Wire-level data model consumed by the client and the desk layer:
//! backend entities, request payloads, response envelopes and the
//! server error body.

pub mod error;
pub mod models;
pub mod response;

pub use serde::{Deserialize, Serialize};

// Envelope re-exports (for convenient access)
pub use response::{ListResponse, Page};
