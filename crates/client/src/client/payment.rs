//! Payment operations.

use serde::{Deserialize, Serialize};

use super::PeanutsClient;
use crate::error::Result;

/// Body of an approved payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub status: String,
    pub transaction_id: String,
    pub amount: f64,
}

impl PeanutsClient {
    /// Submit a payment. Declines and simulated failures come back as
    /// `ClientError::ServerError` carrying the reason.
    pub async fn pay(&self, amount: Option<f64>) -> Result<PaymentReceipt> {
        let mut request = self.client.post(self.url("/payment"));
        if let Some(amount) = amount {
            request = request.query(&[("amount", amount)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }
}
