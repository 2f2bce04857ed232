use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reported state of the simulated payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Healthy,
    Degraded,
}

/// Body of the payment gateway health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHealth {
    pub status: GatewayStatus,
    pub latency_ms: u32,
}

impl GatewayHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == GatewayStatus::Healthy
    }

    pub fn status_code(&self) -> u16 {
        match self.status {
            GatewayStatus::Healthy => 200,
            GatewayStatus::Degraded => 503,
        }
    }
}

/// Draws a gateway health report: 90% healthy with latency in `[10, 50)`,
/// otherwise degraded with latency in `[1000, 5000)`.
pub fn draw_gateway_health<R: Rng>(rng: &mut R) -> GatewayHealth {
    if rng.random_range(0..100) < 90 {
        GatewayHealth {
            status: GatewayStatus::Healthy,
            latency_ms: rng.random_range(10..50),
        }
    } else {
        GatewayHealth {
            status: GatewayStatus::Degraded,
            latency_ms: rng.random_range(1_000..5_000),
        }
    }
}
