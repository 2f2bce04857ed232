//! Simulated payment processing with a fixed failure distribution.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use peanuts_core::simulation::{
    draw_payment_delay, draw_payment_outcome, transaction_id, PaymentOutcome,
    DEFAULT_PAYMENT_AMOUNT,
};

use crate::{handlers::error_response, state::AppState};

#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    #[serde(default = "default_amount")]
    pub amount: f64,
}

fn default_amount() -> f64 {
    DEFAULT_PAYMENT_AMOUNT
}

/// Body returned for an approved payment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub status: &'static str,
    pub transaction_id: String,
    pub amount: f64,
}

/// POST /payment - Processes a payment of `amount`.
///
/// 70% approved, 10% invalid data (400), 10% declined (402), 5% gateway
/// timeout (503), 5% internal error (500).
pub async fn process_payment(
    State(state): State<AppState>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Invalid payment query");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let delay = state.draw(draw_payment_delay);
    state.pause(delay).await;

    let outcome = state.draw(draw_payment_outcome);
    let amount = query.amount;

    match outcome {
        PaymentOutcome::Approved => {
            tracing::info!(amount, reason = outcome.reason(), "Payment succeeded");
            let receipt = PaymentReceipt {
                status: "success",
                transaction_id: transaction_id(chrono::Utc::now().timestamp_millis()),
                amount,
            };
            Json(receipt).into_response()
        }
        PaymentOutcome::InvalidData | PaymentOutcome::Declined => {
            tracing::warn!(amount, reason = outcome.reason(), "Payment failed");
            failure(outcome)
        }
        PaymentOutcome::GatewayTimeout | PaymentOutcome::InternalError => {
            tracing::error!(amount, reason = outcome.reason(), "Payment failed");
            failure(outcome)
        }
    }
}

fn failure(outcome: PaymentOutcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, outcome.reason())
}
