//! Room endpoints (read-only in this client)

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::ListResponse;
use shared::models::{Room, RoomType};

use super::{QueryString, RestApi};
use crate::error::ClientResult;
use crate::http::Transport;

#[async_trait]
pub trait RoomApi: Send + Sync {
    /// Public room listing with optional free-text search.
    async fn list_rooms(&self, search: Option<&str>) -> ClientResult<Vec<Room>>;

    async fn room_detail(&self, id: i64) -> ClientResult<Room>;

    /// Rooms free in the given interval.
    async fn available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ClientResult<Vec<Room>>;

    async fn list_room_types(&self) -> ClientResult<Vec<RoomType>>;
}

#[async_trait]
impl RoomApi for RestApi {
    async fn list_rooms(&self, search: Option<&str>) -> ClientResult<Vec<Room>> {
        let path = QueryString::new()
            .append_opt("search", search)
            .build("rooms/");
        let list: ListResponse<Room> = self.transport.get(&path).await?;
        Ok(list.into_items())
    }

    async fn room_detail(&self, id: i64) -> ClientResult<Room> {
        self.transport.get(&format!("rooms/{id}/")).await
    }

    async fn available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ClientResult<Vec<Room>> {
        let path = QueryString::new()
            .append("check_in", check_in.format("%Y-%m-%d"))
            .append("check_out", check_out.format("%Y-%m-%d"))
            .build("rooms/available/");
        let list: ListResponse<Room> = self.transport.get(&path).await?;
        Ok(list.into_items())
    }

    async fn list_room_types(&self) -> ClientResult<Vec<RoomType>> {
        let list: ListResponse<RoomType> = self.transport.get("room-types/").await?;
        Ok(list.into_items())
    }
}
