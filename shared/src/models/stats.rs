//! Aggregate statistics

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bar of the revenue chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
    pub bookings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRoom {
    pub room_number: String,
    pub bookings: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentBooking {
    pub id: i64,
    pub customer_name: String,
    pub room_number: String,
    pub total_price: Decimal,
    pub created_at: NaiveDate,
}

/// Aggregate snapshot for a (year, month) selection.
///
/// Purely server-computed; the client derives nothing beyond bar
/// geometry from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOverview {
    pub total_revenue: Decimal,
    pub total_bookings: i64,
    pub total_customers: i64,
    pub occupancy_rate: f64,
    #[serde(default)]
    pub monthly_revenue: Vec<MonthlyRevenue>,
    #[serde(default)]
    pub top_rooms: Vec<TopRoom>,
    #[serde(default)]
    pub recent_bookings: Vec<RecentBooking>,
}
