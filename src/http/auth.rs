//! AuthGate: bearer-token verification for privileged mutations.
//!
//! The teacher has no direct analog for minting/verifying application
//! tokens, so this is grounded on the signature-recovery primitive it
//! already uses elsewhere in its own stack
//! (`alloy_primitives::Signature::recover_address_from_msg`, exercised in
//! `src/facilitator_local.rs` and `src/scheme/v1_eip155_exact/mod.rs` via
//! `recover_address_from_prehash`) rather than by introducing a JWT crate.
//!
//! Token format: `base64url(payload_json) '.' hex(65-byte signature)`. The
//! signature is an EIP-191 personal-sign signature over the payload bytes;
//! recovering its signer and comparing against the configured
//! `VerifyingKey` address authenticates the caller. `payload_json` carries
//! a single `exp` (Unix seconds) claim.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, Signature};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or malformed Authorization header")]
    Malformed,
    #[error("bearer token has expired")]
    Expired,
    #[error("bearer token signature does not match the configured verifying key")]
    SignerMismatch,
}

#[derive(Deserialize)]
struct TokenPayload {
    exp: u64,
}

/// Verifies a bearer token against `verifying_address`. The core does not
/// mint tokens, only verifies them.
pub fn verify_bearer_token(token: &str, verifying_address: Address) -> Result<(), AuthError> {
    let (payload_b64, sig_hex) = token.split_once('.').ok_or(AuthError::Malformed)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| AuthError::Malformed)?;
    let payload: TokenPayload =
        serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::Malformed)?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs();
    if payload.exp < now {
        return Err(AuthError::Expired);
    }

    let sig_bytes =
        hex::decode(sig_hex.trim_start_matches("0x")).map_err(|_| AuthError::Malformed)?;
    let signature =
        Signature::try_from(sig_bytes.as_slice()).map_err(|_| AuthError::Malformed)?;
    let recovered = signature
        .recover_address_from_msg(&payload_bytes)
        .map_err(|_| AuthError::SignerMismatch)?;
    if recovered != verifying_address {
        return Err(AuthError::SignerMismatch);
    }
    Ok(())
}

/// Extractor that gates a handler behind a valid bearer token. Handlers that
/// take `Authorized` as an argument run only after successful verification.
pub struct Authorized;

impl<S> FromRequestParts<S> for Authorized
where
    AppState: FromRef<S>,
    S: Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::Malformed)?;
        let token = header.strip_prefix("Bearer ").ok_or(AuthError::Malformed)?;
        verify_bearer_token(token, app_state.verifying_address)?;
        Ok(Authorized)
    }
}
