//! Privileged directory mutation endpoints, gated by [`crate::http::auth::Authorized`].
//!
//! Grounded on the original gateway's `internal/api/register.go` HTTP
//! handlers (`POST /register`, `PUT /update`), which sit behind the same
//! bearer-token gate in front of [`ens_directory::Registrar`] and
//! [`ens_directory::Directory::update`].

use alloy_primitives::Address;
use axum::Json;
use axum::extract::State;
use ens_directory::Registrar;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::http::auth::Authorized;
use crate::http::error::AppError;
use crate::http::model::ApiResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    address: Address,
    hint: String,
}

#[derive(Serialize)]
pub struct RegisterResult {
    name: String,
    address: Address,
    #[serde(rename = "autoChoose")]
    auto_choose: bool,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    name: String,
    address: Address,
}

#[derive(Serialize)]
pub struct UpdateResult {
    name: String,
    address: Address,
}

/// `POST /internal/register`.
#[instrument(skip(state, _auth), fields(hint = %body.hint, address = %body.address))]
pub async fn register(
    _auth: Authorized,
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResult>>, AppError> {
    let registrar = Registrar::new(state.directory.as_ref(), state.parent_suffix.clone());
    let registration = registrar
        .register(&body.hint, body.address)
        .await
        .inspect_err(|e| tracing::warn!(hint = %body.hint, error = %e, "registration failed"))?;
    tracing::debug!(name = %registration.name, auto = registration.auto, "registered binding");
    Ok(Json(ApiResponse::ok(
        "registered",
        RegisterResult {
            name: registration.name,
            address: registration.address,
            auto_choose: registration.auto,
        },
    )))
}

/// `PUT /internal/update`.
#[instrument(skip(state, _auth), fields(name = %body.name, address = %body.address))]
pub async fn update(
    _auth: Authorized,
    State(state): State<AppState>,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<ApiResponse<UpdateResult>>, AppError> {
    state
        .directory
        .update(&body.name, body.address)
        .await
        .inspect_err(|e| tracing::warn!(name = %body.name, error = %e, "update failed"))?;
    tracing::debug!(name = %body.name, "updated binding");
    Ok(Json(ApiResponse::ok(
        "updated",
        UpdateResult {
            name: body.name,
            address: body.address,
        },
    )))
}
