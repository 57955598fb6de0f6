//! Room Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room occupancy status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
    Occupied,
    Maintenance,
}

/// Room type (nested under `Room`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    pub base_price: Decimal,
    pub max_guests: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Room image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomImage {
    pub id: i64,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Room entity (read-only in this client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub status: RoomStatus,
    pub room_type: RoomType,
    #[serde(default)]
    pub images: Vec<RoomImage>,
}
