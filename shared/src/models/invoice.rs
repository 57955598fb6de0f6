//! Invoice Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

/// Invoice line, itemized by room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub room_type: String,
    pub base_price: Decimal,
    pub days: i32,
    pub surcharge: Decimal,
    pub subtotal: Decimal,
}

/// Invoice entity (read-only, rendered from server data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub customer_name: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
