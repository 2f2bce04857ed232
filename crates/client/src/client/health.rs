//! Health check operations.

use peanuts_core::simulation::GatewayHealth;

use super::{server_error, PeanutsClient};
use crate::error::Result;

impl PeanutsClient {
    /// Liveness probe. `true` when the server answered 200.
    pub async fn livez(&self) -> Result<bool> {
        let response = self.client.get(self.url("/livez")).send().await?;
        Ok(response.status().is_success())
    }

    /// Simulated payment gateway health. A degraded gateway answers 503 with
    /// a regular health body, so both are returned as `Ok`.
    pub async fn payment_gateway_health(&self) -> Result<GatewayHealth> {
        let response = self
            .client
            .get(self.url("/health/payment-gateway"))
            .send()
            .await?;

        match response.status().as_u16() {
            200 | 503 => Ok(response.json().await?),
            _ => Err(server_error(response).await),
        }
    }
}
