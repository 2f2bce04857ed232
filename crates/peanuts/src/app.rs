use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        chain::chain,
        characters::{create_character, get_character},
        demo::{cpu_task, error_test, io_task, random_sleep, random_status, root},
        health::{livez, payment_gateway_health},
        payment::process_payment,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let timeout = state.config.request_timeout();

    Router::new()
        // Failure simulation
        .route("/", get(root))
        .route("/io_task", get(io_task))
        .route("/cpu_task", get(cpu_task))
        .route("/random_sleep", get(random_sleep))
        .route("/random_status", get(random_status))
        .route("/chain", get(chain))
        .route("/error_test", get(error_test))
        .route("/payment", post(process_payment))
        // Health
        .route("/livez", get(livez))
        .route("/health/payment-gateway", get(payment_gateway_health))
        // Characters
        .route("/peanuts", post(create_character))
        .route("/peanuts/{id}", get(get_character))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
