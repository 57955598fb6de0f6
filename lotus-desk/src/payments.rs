//! Customer payments controller
//!
//! Read-only list; the only action is following the gateway URL of a
//! pending payment.

use shared::models::{Payment, PaymentStatus};

use lotus_client::api::PaymentApi;

#[derive(Debug, Default)]
pub struct PaymentsView {
    pub payments: Vec<Payment>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PaymentsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: PaymentApi>(&mut self, api: &A) {
        self.loading = true;
        let result = api.list_payments().await;
        self.loading = false;
        match result {
            Ok(payments) => {
                self.payments = payments;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load payments"));
            }
        }
    }

    /// Gateway URL for the pay-now button; only pending payments with a
    /// URL get one.
    pub fn pay_now_url(&self, id: i64) -> Option<&str> {
        self.payments
            .iter()
            .find(|p| p.id == id && p.status == PaymentStatus::Pending)
            .and_then(|p| p.pay_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use lotus_client::error::ClientResult;
    use shared::models::PaymentMethod;

    use super::*;

    struct MockApi;

    #[async_trait]
    impl PaymentApi for MockApi {
        async fn list_payments(&self) -> ClientResult<Vec<Payment>> {
            Ok(vec![
                Payment {
                    id: 1,
                    amount: "500000".parse().unwrap(),
                    payment_method: PaymentMethod::Vnpay,
                    status: PaymentStatus::Pending,
                    paid_at: None,
                    pay_url: Some("https://pay.example/order/1".into()),
                },
                Payment {
                    id: 2,
                    amount: "750000".parse().unwrap(),
                    payment_method: PaymentMethod::Cash,
                    status: PaymentStatus::Completed,
                    paid_at: None,
                    pay_url: None,
                },
            ])
        }
    }

    #[tokio::test]
    async fn only_pending_payments_offer_pay_now() {
        let mut view = PaymentsView::new();
        view.load(&MockApi).await;

        assert_eq!(view.pay_now_url(1), Some("https://pay.example/order/1"));
        assert_eq!(view.pay_now_url(2), None);
        assert_eq!(view.pay_now_url(99), None);
    }
}
