//! Placeholder metrics endpoint, toggled by [`crate::state::AppState::metrics_enabled`].
//!
//! The original gateway exposes Prometheus text format at `/metrics`; this
//! deployment carries the route and the toggle without wiring a collector,
//! matching the expanded spec's ambient-concern treatment of observability.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// `GET /metrics`.
pub async fn metrics(State(state): State<AppState>) -> Response {
    if !state.metrics_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        "# ens-gateway metrics collection is not yet wired to a registry\n",
    )
        .into_response()
}
