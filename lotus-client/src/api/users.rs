//! User management endpoints (staff and customer collections)

use async_trait::async_trait;
use shared::ListResponse;
use shared::models::{ToggleActiveResponse, User, UserCreate, UserUpdate};

use super::{RestApi, UserQuery};
use crate::error::ClientResult;
use crate::http::Transport;

#[async_trait]
pub trait UserAdminApi: Send + Sync {
    async fn list_staff(&self, query: &UserQuery) -> ClientResult<ListResponse<User>>;

    async fn list_customers(&self, query: &UserQuery) -> ClientResult<ListResponse<User>>;

    /// Customer creation (the public registration collection).
    async fn create_user(&self, req: &UserCreate) -> ClientResult<User>;

    /// Staff creation (admin-only endpoint).
    async fn create_staff(&self, req: &UserCreate) -> ClientResult<User>;

    async fn update_user(&self, id: i64, req: &UserUpdate) -> ClientResult<User>;

    /// Flip activation; the server decides the resulting state and the
    /// confirmation message.
    async fn toggle_active(&self, id: i64) -> ClientResult<ToggleActiveResponse>;
}

#[async_trait]
impl UserAdminApi for RestApi {
    async fn list_staff(&self, query: &UserQuery) -> ClientResult<ListResponse<User>> {
        self.transport.get(&query.to_path("users/staff_list/")).await
    }

    async fn list_customers(&self, query: &UserQuery) -> ClientResult<ListResponse<User>> {
        self.transport
            .get(&query.to_path("users/customers_list/"))
            .await
    }

    async fn create_user(&self, req: &UserCreate) -> ClientResult<User> {
        self.transport.post("users/", req).await
    }

    async fn create_staff(&self, req: &UserCreate) -> ClientResult<User> {
        self.transport.post("users/create_staff/", req).await
    }

    async fn update_user(&self, id: i64, req: &UserUpdate) -> ClientResult<User> {
        self.transport.put(&format!("users/{id}/"), req).await
    }

    async fn toggle_active(&self, id: i64) -> ClientResult<ToggleActiveResponse> {
        self.transport
            .post_empty(&format!("users/{id}/toggle_active/"))
            .await
    }
}
