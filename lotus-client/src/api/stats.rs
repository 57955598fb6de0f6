//! Aggregate statistics endpoint

use async_trait::async_trait;
use shared::models::StatsOverview;

use super::{QueryString, RestApi};
use crate::error::ClientResult;
use crate::http::Transport;

#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Snapshot for the given year/month selection.
    async fn stats_overview(&self, year: i32, month: u32) -> ClientResult<StatsOverview>;
}

#[async_trait]
impl StatsApi for RestApi {
    async fn stats_overview(&self, year: i32, month: u32) -> ClientResult<StatsOverview> {
        let path = QueryString::new()
            .append("year", year)
            .append("month", month)
            .build("api/stats/");
        self.transport.get(&path).await
    }
}
