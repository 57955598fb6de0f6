//! Booking endpoints and the checkout workflow

use async_trait::async_trait;
use shared::ListResponse;
use shared::models::{
    Booking, BookingCreate, CheckoutInfo, CheckoutRequest, CheckoutResponse, PriceCalculation,
    PriceQuote, PriceQuoteRequest,
};

use super::{PageQuery, RestApi};
use crate::error::ClientResult;
use crate::http::Transport;

#[derive(serde::Serialize)]
struct CalculatePriceRequest {
    discount_code_id: Option<i64>,
}

/// Booking lifecycle operations
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn create_booking(&self, req: &BookingCreate) -> ClientResult<Booking>;

    /// Pre-booking estimate for one room and date range.
    async fn quote_price(&self, req: &PriceQuoteRequest) -> ClientResult<PriceQuote>;

    /// Staff list, server-side paginated and searchable.
    async fn list_bookings(&self, query: &PageQuery) -> ClientResult<ListResponse<Booking>>;

    /// Bookings of the authenticated customer. Both list shapes occur
    /// in the wild for this endpoint.
    async fn my_bookings(&self) -> ClientResult<ListResponse<Booking>>;

    async fn booking_detail(&self, id: i64) -> ClientResult<Booking>;

    async fn cancel_booking(&self, id: i64) -> ClientResult<()>;

    async fn check_in(&self, id: i64) -> ClientResult<()>;

    /// Settle-free checkout transition used by the desk list button;
    /// the billing path goes through [`CheckoutApi::submit_checkout`].
    async fn check_out(&self, id: i64) -> ClientResult<()>;
}

/// End-of-stay billing workflow
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn checkout_info(&self, booking_id: i64) -> ClientResult<CheckoutInfo>;

    async fn calculate_checkout_price(
        &self,
        booking_id: i64,
        discount_code_id: Option<i64>,
    ) -> ClientResult<PriceCalculation>;

    async fn submit_checkout(
        &self,
        booking_id: i64,
        req: &CheckoutRequest,
    ) -> ClientResult<CheckoutResponse>;
}

#[async_trait]
impl BookingApi for RestApi {
    async fn create_booking(&self, req: &BookingCreate) -> ClientResult<Booking> {
        let booking: Booking = self.transport.post("bookings/", req).await?;
        tracing::debug!(booking_id = booking.id, "Booking created");
        Ok(booking)
    }

    async fn quote_price(&self, req: &PriceQuoteRequest) -> ClientResult<PriceQuote> {
        self.transport.post("bookings/calculate-price/", req).await
    }

    async fn list_bookings(&self, query: &PageQuery) -> ClientResult<ListResponse<Booking>> {
        self.transport.get(&query.to_path("bookings/")).await
    }

    async fn my_bookings(&self) -> ClientResult<ListResponse<Booking>> {
        self.transport.get("bookings/my-bookings/").await
    }

    async fn booking_detail(&self, id: i64) -> ClientResult<Booking> {
        self.transport.get(&format!("bookings/{id}/")).await
    }

    async fn cancel_booking(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self
            .transport
            .post_empty(&format!("bookings/{id}/cancel/"))
            .await?;
        tracing::debug!(booking_id = id, "Booking cancelled");
        Ok(())
    }

    async fn check_in(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self
            .transport
            .post_empty(&format!("bookings/{id}/checkin/"))
            .await?;
        tracing::debug!(booking_id = id, "Booking checked in");
        Ok(())
    }

    async fn check_out(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self
            .transport
            .post_empty(&format!("bookings/{id}/checkout/"))
            .await?;
        tracing::debug!(booking_id = id, "Booking checked out");
        Ok(())
    }
}

#[async_trait]
impl CheckoutApi for RestApi {
    async fn checkout_info(&self, booking_id: i64) -> ClientResult<CheckoutInfo> {
        self.transport
            .get(&format!("bookings/{booking_id}/checkout-info/"))
            .await
    }

    async fn calculate_checkout_price(
        &self,
        booking_id: i64,
        discount_code_id: Option<i64>,
    ) -> ClientResult<PriceCalculation> {
        self.transport
            .post(
                &format!("bookings/{booking_id}/calculate-checkout-price/"),
                &CalculatePriceRequest { discount_code_id },
            )
            .await
    }

    async fn submit_checkout(
        &self,
        booking_id: i64,
        req: &CheckoutRequest,
    ) -> ClientResult<CheckoutResponse> {
        self.transport
            .post(&format!("bookings/{booking_id}/checkout/"), req)
            .await
    }
}
