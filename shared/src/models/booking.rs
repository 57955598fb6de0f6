//! Booking Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// Client-initiated transitions: confirmed -> checked_in,
/// checked_in -> checked_out, {pending, confirmed} -> cancelled.
/// Everything else (confirmation, no_show) is decided server-side and
/// only ever arrives in responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Cancellation is only offered while the stay has not started.
    pub fn can_cancel(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn can_check_in(self) -> bool {
        self == BookingStatus::Confirmed
    }

    pub fn can_check_out(self) -> bool {
        self == BookingStatus::CheckedIn
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::CheckedIn => "Checked in",
            BookingStatus::CheckedOut => "Checked out",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::NoShow => "No show",
        }
    }
}

/// Compact room info embedded in `room_details`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: i64,
    pub room_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type_name: Option<String>,
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub rooms: Vec<i64>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub status: BookingStatus,
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub room_details: Vec<RoomSummary>,
}

impl Booking {
    /// Nights between check-in and check-out (at least one).
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days().max(1)
    }
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub rooms: Vec<i64>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// Only present when a desk role books on behalf of a customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<i64>,
}

/// Pre-booking price quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuoteRequest {
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
}

/// Pre-booking price quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub original_price: Decimal,
    pub total_price: Decimal,
}
