//! Analytics dashboard controller
//!
//! All numbers are server-computed; the only client-side derivation is
//! the bar geometry of the revenue chart.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::StatsOverview;

use lotus_client::api::StatsApi;

/// Bars never shrink below this, so tiny months stay visible.
pub const MIN_BAR_HEIGHT: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub height: f64,
    pub revenue: Decimal,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevenueChart {
    /// No revenue rows (or all zero); render the placeholder.
    Empty,
    Bars(Vec<Bar>),
}

#[derive(Debug)]
pub struct AnalyticsView {
    pub year: i32,
    pub month: u32,
    pub stats: Option<StatsOverview>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalyticsView {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            stats: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load<A: StatsApi>(&mut self, api: &A) {
        self.loading = true;
        let result = api.stats_overview(self.year, self.month).await;
        self.loading = false;
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load statistics"));
            }
        }
    }

    pub async fn set_period<A: StatsApi>(&mut self, api: &A, year: i32, month: u32) {
        self.year = year;
        self.month = month;
        self.load(api).await;
    }

    /// Bar heights scale linearly against the best month, floored at
    /// [`MIN_BAR_HEIGHT`].
    pub fn chart(&self, max_height: f64) -> RevenueChart {
        let Some(stats) = &self.stats else {
            return RevenueChart::Empty;
        };
        let max = stats
            .monthly_revenue
            .iter()
            .map(|row| row.revenue)
            .max()
            .unwrap_or(Decimal::ZERO);
        if max <= Decimal::ZERO {
            return RevenueChart::Empty;
        }
        let bars = stats
            .monthly_revenue
            .iter()
            .map(|row| {
                let ratio = (row.revenue / max).to_f64().unwrap_or(0.0);
                Bar {
                    label: row.month.clone(),
                    height: (ratio * max_height).max(MIN_BAR_HEIGHT),
                    revenue: row.revenue,
                    bookings: row.bookings,
                }
            })
            .collect();
        RevenueChart::Bars(bars)
    }
}
