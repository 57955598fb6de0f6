//! Checkout types
//!
//! "Checkout" here is the end-of-stay billing workflow, not a cart
//! purchase. Everything in this module is ephemeral: the snapshot is
//! fetched when the dialog opens and the price recalculated on every
//! discount-code change, never persisted client-side.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::booking::Booking;
use super::discount::DiscountCode;
use super::user::CustomerType;

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Vnpay,
    Stripe,
}

/// A payment method as offered by the backend (value + display label)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodOption {
    pub value: PaymentMethod,
    pub label: String,
}

/// Customer snapshot embedded in the checkout info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
}

/// Actual rental window (may differ from the booked dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalWindow {
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
}

/// Everything the checkout dialog needs, fetched on open
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutInfo {
    pub customer: CustomerSnapshot,
    pub booking: Booking,
    pub rental: RentalWindow,
    #[serde(default)]
    pub available_discount_codes: Vec<DiscountCode>,
    pub payment_methods: Vec<PaymentMethodOption>,
    pub estimated_price: Decimal,
}

/// Result of a price recalculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceCalculation {
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub discount_percentage: Decimal,
    pub final_price: Decimal,
}

impl PriceCalculation {
    /// Fallback used when recalculation fails: the unmodified estimate
    /// with zero discount, so the dialog never blocks on a failed call.
    pub fn without_discount(estimated_price: Decimal) -> Self {
        Self {
            original_price: estimated_price,
            discount_amount: Decimal::ZERO,
            discount_percentage: Decimal::ZERO,
            final_price: estimated_price,
        }
    }
}

/// Checkout submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    /// `None` serializes as an explicit null, matching what the backend
    /// expects for "no discount".
    pub discount_code_id: Option<i64>,
}

/// Checkout submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Present when the gateway wants a browser redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnpay_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<Decimal>,
}
