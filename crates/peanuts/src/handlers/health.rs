//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/health/payment-gateway` - Simulated upstream health that occasionally degrades

use axum::{extract::State, http::StatusCode, Json};

use peanuts_core::simulation::{draw_gateway_health, GatewayHealth};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /health/payment-gateway - 200 when healthy, 503 when degraded.
pub async fn payment_gateway_health(
    State(state): State<AppState>,
) -> (StatusCode, Json<GatewayHealth>) {
    let health = state.draw(draw_gateway_health);

    if !health.is_healthy() {
        tracing::warn!(latency_ms = health.latency_ms, "Payment gateway health check degraded");
    }

    let status = StatusCode::from_u16(health.status_code()).unwrap_or(StatusCode::OK);
    (status, Json(health))
}
