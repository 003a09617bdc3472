//! The CCIP-Read resolver pipeline: `GET /{sender}/{data}`.
//!
//! Grounded on the worldcoin CCIP-Read gateway's resolver handler (decode
//! outer, decode wire name, decode inner call, look up, sign) and on the
//! original gateway's `internal/api/resolve.go` for the cross-validation
//! step between the namehash derived from the wire name and the node the
//! inner call carries.

use alloy_primitives::Address;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum CcipError {
    #[error("malformed outer resolve(bytes,bytes) call: {0}")]
    BadOuter(String),
    #[error("unsupported or malformed inner resolver call")]
    UnsupportedFunction,
    #[error("wire name does not match the node in the inner call")]
    NameMismatch,
    #[error("name failed IDNA normalization: {0}")]
    InvalidName(String),
    #[error("name is not resolved by this gateway")]
    NameNotResolved,
    #[error("directory backend failure")]
    BackendFailure,
}

/// CCIP-Read clients expect `{"message": "..."}` on failure, not the
/// `ApiResponse` envelope the rest of the HTTP surface uses.
#[derive(Serialize)]
struct CcipErrorBody {
    message: String,
}

impl IntoResponse for CcipError {
    fn into_response(self) -> Response {
        let status = match &self {
            CcipError::BadOuter(_)
            | CcipError::UnsupportedFunction
            | CcipError::NameMismatch
            | CcipError::InvalidName(_) => StatusCode::BAD_REQUEST,
            CcipError::NameNotResolved => StatusCode::NOT_FOUND,
            CcipError::BackendFailure => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();
        if matches!(self, CcipError::BackendFailure) {
            tracing::error!(%message, "ccip pipeline backend failure");
        }
        (status, Json(CcipErrorBody { message })).into_response()
    }
}

/// `GET /{sender}/{data}`: `sender` is the EIP-55 resolver address the
/// on-chain `OffchainLookup` revert named, `data` is `0x`-prefixed hex of
/// the full `resolve(bytes,bytes)` calldata, with an optional `.json`
/// suffix some CCIP-Read clients append (stripped before decoding).
#[instrument(skip(state), fields(sender = %sender))]
pub async fn handle_ccip(
    State(state): State<AppState>,
    Path((sender, data)): Path<(String, String)>,
) -> Result<Response, CcipError> {
    let sender: Address = sender
        .parse()
        .map_err(|_| CcipError::BadOuter("sender is not a valid address".to_string()))?;
    let data = data.strip_suffix(".json").unwrap_or(&data);
    let calldata = hex::decode(data.trim_start_matches("0x"))
        .map_err(|e| CcipError::BadOuter(e.to_string()))?;
    tracing::debug!(calldata_len = calldata.len(), "decoded ccip request");

    let (wire_name, inner_data) = state
        .abi_codec
        .decode_outer(&calldata)
        .map_err(|e| CcipError::BadOuter(e.to_string()))?;
    let name = state.name_codec.decode_wire(&wire_name);
    let normalized = state
        .name_codec
        .normalize(&name)
        .map_err(|e| CcipError::InvalidName(e.to_string()))?;
    tracing::debug!(name = %normalized, "resolving name");

    let inner_call = state
        .abi_codec
        .decode_inner(&inner_data)
        .map_err(|_| CcipError::UnsupportedFunction)?;

    let expected_node = state.name_codec.namehash(&normalized);
    if inner_call.node() != expected_node {
        tracing::warn!(name = %normalized, "inner call node does not match wire name namehash");
        return Err(CcipError::NameMismatch);
    }

    let address = state
        .directory
        .lookup_name(&normalized)
        .await
        .map_err(|e| match e {
            ens_directory::DirectoryError::NameNotFound => CcipError::NameNotResolved,
            _ => CcipError::BackendFailure,
        })?;

    let result_bytes = state.abi_codec.encode_result(&inner_call, address);
    let signed = state
        .signer
        .sign(sender, &calldata, &result_bytes)
        .await
        .map_err(|_| CcipError::BackendFailure)?;

    Ok(Json(serde_json::json!({ "data": signed.0 })).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy_primitives::address;
    use alloy_signer_local::PrivateKeySigner;
    use axum::extract::{Path, State};
    use ens_directory::{Directory, InMemoryDirectory};
    use ens_eip155::{AbiCodec, GatewaySigner};
    use ens_types::NameCodec;

    use super::*;

    const COIN_TYPE: u64 = 2147525868;

    fn wire_encode(name: &str) -> Vec<u8> {
        let mut wire = Vec::new();
        for label in name.split('.') {
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
        wire.push(0);
        wire
    }

    fn build_calldata(name: &str, node: alloy_primitives::B256) -> String {
        use alloy_sol_types::SolValue;

        let wire_name = wire_encode(name);
        let mut inner = ens_eip155::abi::ADDR_SELECTOR.to_vec();
        inner.extend_from_slice(node.as_slice());

        let outer_params = (
            alloy_primitives::Bytes::from(wire_name),
            alloy_primitives::Bytes::from(inner),
        )
            .abi_encode_params();
        let mut outer = ens_eip155::abi::RESOLVE_SELECTOR.to_vec();
        outer.extend_from_slice(&outer_params);
        format!("0x{}", hex::encode(outer))
    }

    async fn test_state(directory: InMemoryDirectory) -> AppState {
        let signer = PrivateKeySigner::random();
        let verifying_address = signer.address();
        AppState {
            directory: Arc::new(directory),
            signer: Arc::new(GatewaySigner::new(signer)),
            abi_codec: AbiCodec::new(COIN_TYPE),
            name_codec: NameCodec::new(),
            parent_suffix: ".sarafu.eth".to_string(),
            verifying_address,
            metrics_enabled: false,
        }
    }

    #[tokio::test]
    async fn ccip_happy_path_resolves_and_signs() {
        let name = "alice.sarafu.eth";
        let address = address!("000000000000000000000000000000000000aa");
        let directory = InMemoryDirectory::new();
        directory.register(name, address).await.unwrap();
        let state = test_state(directory).await;

        let node = state.name_codec.namehash(name);
        let data = build_calldata(name, node);
        let sender = address!("000000000000000000000000000000000000bb").to_string();

        let response = handle_ccip(State(state), Path((sender, data)))
            .await
            .expect("ccip pipeline should succeed");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ccip_happy_path_accepts_json_suffix() {
        let name = "alice.sarafu.eth";
        let address = address!("000000000000000000000000000000000000aa");
        let directory = InMemoryDirectory::new();
        directory.register(name, address).await.unwrap();
        let state = test_state(directory).await;

        let node = state.name_codec.namehash(name);
        let data = format!("{}.json", build_calldata(name, node));
        let sender = address!("000000000000000000000000000000000000bb").to_string();

        let response = handle_ccip(State(state), Path((sender, data)))
            .await
            .expect("ccip pipeline should succeed with .json suffix");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ccip_rejects_node_mismatch() {
        let name = "alice.sarafu.eth";
        let address = address!("000000000000000000000000000000000000aa");
        let directory = InMemoryDirectory::new();
        directory.register(name, address).await.unwrap();
        let state = test_state(directory).await;

        // Node corresponds to a different name than the wire name carries.
        let wrong_node = state.name_codec.namehash("bob.sarafu.eth");
        let data = build_calldata(name, wrong_node);
        let sender = address!("000000000000000000000000000000000000bb").to_string();

        let err = handle_ccip(State(state), Path((sender, data)))
            .await
            .expect_err("mismatched node must be rejected");
        assert!(matches!(err, CcipError::NameMismatch));
    }
}
