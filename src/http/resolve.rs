//! Direct forward/reverse lookup endpoints, outside the CCIP-Read pipeline.
//!
//! Grounded on the original gateway's `internal/api/resolve.go` HTTP
//! handlers, which expose the directory directly for clients that don't
//! need the on-chain CCIP-Read round trip.

use alloy_primitives::Address;
use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use tracing::instrument;

use crate::http::error::AppError;
use crate::http::model::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResolveResult {
    address: Address,
}

#[derive(Serialize)]
pub struct ReverseResult {
    name: String,
}

/// `GET /resolve/{name}`.
#[instrument(skip(state), fields(name = %name))]
pub async fn resolve_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ResolveResult>>, AppError> {
    let normalized = state
        .name_codec
        .normalize(&name)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    tracing::debug!(name = %normalized, "resolving name");
    let address = state.directory.lookup_name(&normalized).await.inspect_err(
        |e| tracing::warn!(name = %normalized, error = %e, "forward lookup failed"),
    )?;
    Ok(Json(ApiResponse::ok("resolved", ResolveResult { address })))
}

/// `GET /reverse/{address}`.
#[instrument(skip(state), fields(address = %address))]
pub async fn reverse_lookup(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<ReverseResult>>, AppError> {
    let address: Address = address
        .parse()
        .map_err(|_| AppError::Validation("address is not a valid EIP-55 address".to_string()))?;
    tracing::debug!(%address, "reverse looking up address");
    let name = state
        .directory
        .reverse_lookup(address)
        .await
        .inspect_err(|e| tracing::warn!(%address, error = %e, "reverse lookup failed"))?;
    Ok(Json(ApiResponse::ok("resolved", ReverseResult { name })))
}
