//! Fan-out endpoint that calls other instances in sequence.

use anyhow::Context;
use axum::extract::State;

use crate::{handlers::AppError, state::AppState};

/// GET /chain - Calls `/`, `/io_task` and `/cpu_task` on the configured hosts,
/// one after another. Any failed call fails the whole chain.
pub async fn chain(State(state): State<AppState>) -> Result<&'static str, AppError> {
    tracing::debug!("chain is starting");

    for url in state.config.chain_urls() {
        let body = state
            .http
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("Chain call to {url} failed"))?
            .text()
            .await
            .with_context(|| format!("Chain call to {url} returned an unreadable body"))?;

        tracing::debug!(%url, body = %body, "chain call finished");
    }

    tracing::debug!("chain is finished");
    Ok("chain")
}
