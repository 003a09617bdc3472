//! HTTP surface: CCIP-Read pipeline, direct lookups, privileged mutations.

pub mod auth;
pub mod ccip;
pub mod error;
pub mod metrics;
pub mod model;
pub mod register;
pub mod resolve;

use axum::Router;
use axum::routing::{get, post, put};

use crate::state::AppState;

/// Builds the full router. `sender/{*data}` is the EIP-3668 CCIP-Read entry
/// point; the rest are direct-access endpoints the original gateway also
/// exposes outside the on-chain round trip.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{sender}/{*data}", get(ccip::handle_ccip))
        .route("/resolve/{name}", get(resolve::resolve_name))
        .route("/reverse/{address}", get(resolve::reverse_lookup))
        .route("/internal/register", post(register::register))
        .route("/internal/update", put(register::update))
        .route("/metrics", get(metrics::metrics))
}
