//! Demo endpoints that produce latency, CPU work and random statuses.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;

use peanuts_core::simulation::{
    cpu_burn, draw_random_sleep, draw_random_status, greeting, IO_TASK_DELAY,
};

use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct GreetingQuery {
    pub name: Option<String>,
}

/// GET / - Greets `name`, or the world.
pub async fn root(Query(query): Query<GreetingQuery>, headers: HeaderMap) -> String {
    tracing::debug!(?headers, "Request headers");

    let message = greeting(query.name.as_deref().filter(|name| !name.is_empty()));
    tracing::info!("{message}");
    message
}

/// GET /io_task - Waits on a fixed delay.
pub async fn io_task(State(state): State<AppState>) -> &'static str {
    state.pause(IO_TASK_DELAY).await;
    tracing::info!("io_task");
    "io_task"
}

/// GET /cpu_task - Runs a short busy loop.
pub async fn cpu_task() -> &'static str {
    let total = cpu_burn();
    tracing::info!(total, "cpu_task");
    "cpu_task"
}

/// GET /random_sleep - Waits for a random duration below two seconds.
pub async fn random_sleep(State(state): State<AppState>) -> &'static str {
    let delay = state.draw(draw_random_sleep);
    state.pause(delay).await;
    tracing::info!(delay_ms = delay.as_millis() as u64, "random_sleep");
    "random_sleep"
}

/// GET /random_status - Responds with a randomly drawn status code.
pub async fn random_status(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let code = state.draw(draw_random_status);
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!(status = code, "random_status");
    } else if status.is_client_error() {
        tracing::warn!(status = code, "random_status");
    } else {
        tracing::info!(status = code, "random_status");
    }

    (status, "random_status")
}

/// GET /error_test - Always fails.
pub async fn error_test() -> Result<&'static str, AppError> {
    Err(anyhow::anyhow!("Error test").into())
}
