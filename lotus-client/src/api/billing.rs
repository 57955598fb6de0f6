//! Invoice and payment endpoints (read-only)

use async_trait::async_trait;
use shared::ListResponse;
use shared::models::{Invoice, Payment};

use super::RestApi;
use crate::error::ClientResult;
use crate::http::Transport;

#[async_trait]
pub trait InvoiceApi: Send + Sync {
    async fn list_invoices(&self) -> ClientResult<Vec<Invoice>>;
    async fn invoice_detail(&self, id: i64) -> ClientResult<Invoice>;
}

#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn list_payments(&self) -> ClientResult<Vec<Payment>>;
}

#[async_trait]
impl InvoiceApi for RestApi {
    async fn list_invoices(&self) -> ClientResult<Vec<Invoice>> {
        let list: ListResponse<Invoice> = self.transport.get("invoices/").await?;
        Ok(list.into_items())
    }

    async fn invoice_detail(&self, id: i64) -> ClientResult<Invoice> {
        self.transport.get(&format!("invoices/{id}/")).await
    }
}

#[async_trait]
impl PaymentApi for RestApi {
    async fn list_payments(&self) -> ClientResult<Vec<Payment>> {
        let list: ListResponse<Payment> = self.transport.get("payments/").await?;
        Ok(list.into_items())
    }
}
