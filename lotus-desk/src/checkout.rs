//! Checkout dialog controller
//!
//! End-of-stay billing: snapshot fetched on open, price recalculated on
//! every discount change, one submit. Recalculations carry a sequence
//! number so a slow response for an older discount choice can never
//! overwrite the price of a newer one.

use shared::models::{
    CheckoutInfo, CheckoutRequest, CheckoutResponse, PaymentMethod, PriceCalculation,
};

use lotus_client::api::CheckoutApi;
use lotus_client::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    /// Snapshot fetch in flight.
    Loading,
    Ready,
    Submitting,
    /// Snapshot fetch failed; `error` says why.
    Failed,
}

/// What the UI should do after a successful submit.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Send the operator's browser to the payment gateway.
    Redirect(String),
    Completed(CheckoutResponse),
}

#[derive(Debug)]
pub struct CheckoutDialog {
    pub state: DialogState,
    pub booking_id: Option<i64>,
    pub info: Option<CheckoutInfo>,
    pub payment_method: Option<PaymentMethod>,
    pub discount_code_id: Option<i64>,
    pub price: Option<PriceCalculation>,
    pub error: Option<String>,
    recalc_seq: u64,
}

impl Default for CheckoutDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutDialog {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            booking_id: None,
            info: None,
            payment_method: None,
            discount_code_id: None,
            price: None,
            error: None,
            recalc_seq: 0,
        }
    }

    /// Open for one booking: fetch the snapshot, default the payment
    /// method to the first one offered, and price the no-discount case.
    pub async fn open<A: CheckoutApi>(&mut self, api: &A, booking_id: i64) {
        *self = Self::new();
        self.state = DialogState::Loading;
        self.booking_id = Some(booking_id);
        match api.checkout_info(booking_id).await {
            Ok(info) => {
                self.payment_method = info.payment_methods.first().map(|option| option.value);
                self.info = Some(info);
                self.state = DialogState::Ready;
                let seq = self.begin_recalc(None);
                let result = api.calculate_checkout_price(booking_id, None).await;
                self.apply_recalc(seq, result);
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load checkout details"));
                self.state = DialogState::Failed;
            }
        }
    }

    /// Record a discount choice and reserve a sequence number for its
    /// recalculation. Any earlier in-flight recalculation is superseded
    /// from this moment on.
    pub fn begin_recalc(&mut self, discount_code_id: Option<i64>) -> u64 {
        self.discount_code_id = discount_code_id;
        self.recalc_seq += 1;
        self.recalc_seq
    }

    /// Apply a recalculation result. Stale responses (a newer sequence
    /// was issued since) are discarded; returns whether it was applied.
    /// A failed call falls back to the undiscounted estimate so the
    /// dialog always shows a price.
    pub fn apply_recalc(&mut self, seq: u64, result: ClientResult<PriceCalculation>) -> bool {
        if seq != self.recalc_seq {
            return false;
        }
        match result {
            Ok(price) => self.price = Some(price),
            Err(err) => {
                tracing::debug!(error = %err, "Price recalculation failed");
                self.price = self
                    .info
                    .as_ref()
                    .map(|info| PriceCalculation::without_discount(info.estimated_price));
            }
        }
        true
    }

    pub async fn select_discount<A: CheckoutApi>(
        &mut self,
        api: &A,
        discount_code_id: Option<i64>,
    ) {
        if self.state != DialogState::Ready {
            return;
        }
        let Some(booking_id) = self.booking_id else {
            return;
        };
        let seq = self.begin_recalc(discount_code_id);
        let result = api.calculate_checkout_price(booking_id, discount_code_id).await;
        self.apply_recalc(seq, result);
    }

    /// Submit the checkout. On success the dialog closes and the
    /// outcome says whether to follow a gateway redirect; on failure it
    /// stays open with the server's message so the operator can retry.
    pub async fn submit<A: CheckoutApi>(&mut self, api: &A) -> Option<CheckoutOutcome> {
        if self.state != DialogState::Ready {
            return None;
        }
        let (Some(booking_id), Some(payment_method)) = (self.booking_id, self.payment_method)
        else {
            return None;
        };
        self.state = DialogState::Submitting;
        let req = CheckoutRequest {
            payment_method,
            discount_code_id: self.discount_code_id,
        };
        match api.submit_checkout(booking_id, &req).await {
            Ok(response) => {
                *self = Self::new();
                if payment_method == PaymentMethod::Vnpay {
                    if let Some(url) = response.vnpay_url.clone() {
                        return Some(CheckoutOutcome::Redirect(url));
                    }
                }
                Some(CheckoutOutcome::Completed(response))
            }
            Err(err) => {
                self.error = Some(err.display_message("Checkout failed"));
                self.state = DialogState::Ready;
                None
            }
        }
    }

    pub fn close(&mut self) {
        *self = Self::new();
    }
}
