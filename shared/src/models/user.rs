//! User Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Owner,
    Staff,
    Customer,
}

impl UserRole {
    /// Roles allowed to create bookings on behalf of a customer.
    pub fn is_desk_role(self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Admin | UserRole::Owner)
    }
}

/// Customer tier, maintained by the backend from booking history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    #[default]
    New,
    Regular,
    Vip,
    SuperVip,
}

impl CustomerType {
    /// Wire form used in query-string filters.
    pub fn as_wire(self) -> &'static str {
        match self {
            CustomerType::New => "NEW",
            CustomerType::Regular => "REGULAR",
            CustomerType::Vip => "VIP",
            CustomerType::SuperVip => "SUPER_VIP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CustomerType::New => "New",
            CustomerType::Regular => "Regular",
            CustomerType::Vip => "VIP",
            CustomerType::SuperVip => "Super VIP",
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub id_card: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bookings: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create user payload (password is mandatory on create)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
}

/// Update user payload
///
/// `password: None` means "unchanged" and the key is omitted from the
/// wire payload entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
}

/// Response of the toggle-active action; `message` is surfaced verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleActiveResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
