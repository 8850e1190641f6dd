use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{Invoice, InvoiceStatistics, Payment};

/// Invoices and payments.
pub struct FinanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FinanceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        self.client.get_list("invoices/").await
    }

    pub async fn payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.client.get_list("payments/").await
    }

    pub async fn create_payment<B: Serialize + ?Sized>(&self, body: &B) -> Result<Payment, ApiError> {
        self.client.post("payments/", body).await
    }

    pub async fn statistics(&self) -> Result<InvoiceStatistics, ApiError> {
        self.client.get("invoices/statistics/").await
    }
}
