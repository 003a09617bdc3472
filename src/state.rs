//! Shared application state handed to every HTTP handler.

use std::sync::Arc;

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use ens_directory::Directory;
use ens_eip155::{AbiCodec, GatewaySigner};
use ens_types::NameCodec;

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub signer: Arc<GatewaySigner<PrivateKeySigner>>,
    pub abi_codec: AbiCodec,
    pub name_codec: NameCodec,
    pub parent_suffix: String,
    pub verifying_address: Address,
    pub metrics_enabled: bool,
}

impl AppState {
    pub fn new(config: &GatewayConfig, directory: Arc<dyn Directory>) -> Self {
        let signing_key = PrivateKeySigner::from_bytes(&config.signing_key())
            .expect("signing key must be a valid secp256k1 private key");
        Self {
            directory,
            signer: Arc::new(GatewaySigner::new(signing_key)),
            abi_codec: AbiCodec::new(config.coin_type()),
            name_codec: NameCodec::new(),
            parent_suffix: config.parent_suffix().to_string(),
            verifying_address: config.verifying_address(),
            metrics_enabled: config.metrics_enabled(),
        }
    }
}
