//! EIP-191 gateway digest construction and secp256k1 signing.
//!
//! `SignerLike` is carried over near-verbatim from the teacher's
//! `x402_chain_eip155::v1_eip155_exact::client::SignerLike`: it exists so the
//! gateway can hold either an owned `PrivateKeySigner` or an `Arc`-shared one
//! without alloy's own `Signer` trait (which isn't implemented for `Arc<T>`)
//! getting in the way.
//!
//! The digest layout and response encoding are grounded on the worldcoin
//! CCIP-Read gateway's `sign_response`: `abi_encode_packed` for the EIP-191
//! message, `abi_encode_params` for the final `(bytes, uint64, bytes)` tuple.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, FixedBytes, Signature, U64, keccak256};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolValue;
use async_trait::async_trait;

use crate::error::SignError;

/// Default time-to-live for a signed gateway answer, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Abstracts over owned vs. `Arc`-wrapped secp256k1 signers.
#[async_trait]
pub trait SignerLike {
    fn address(&self) -> Address;
    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error>;
}

#[async_trait]
impl SignerLike for PrivateKeySigner {
    fn address(&self) -> Address {
        PrivateKeySigner::address(self)
    }

    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error> {
        alloy_signer::Signer::sign_hash(self, hash).await
    }
}

#[async_trait]
impl<T: SignerLike + Send + Sync> SignerLike for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_hash(hash).await
    }
}

/// The final, hex-prefixed ABI-encoded `(bytes result, uint64 expires, bytes signature)`
/// blob a CCIP-Read client returns on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedResponse(pub String);

/// Produces EIP-191 gateway signatures over `(sender, outer_data, result)`.
pub struct GatewaySigner<S> {
    signer: S,
    ttl_secs: u64,
}

impl<S> GatewaySigner<S>
where
    S: SignerLike + Sync,
{
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    pub fn with_ttl(signer: S, ttl_secs: u64) -> Self {
        Self { signer, ttl_secs }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Builds the EIP-191 digest, signs it, and ABI-encodes the response.
    pub async fn sign(
        &self,
        sender: Address,
        outer_data: &[u8],
        result_bytes: &[u8],
    ) -> Result<SignedResponse, SignError> {
        let expires = now_unix_secs() + self.ttl_secs;
        let req_hash = keccak256(outer_data);
        let res_hash = keccak256(result_bytes);

        let digest_body: Vec<u8> = (
            [0x19u8, 0x00u8],
            sender,
            U64::from(expires).to_be_bytes_vec(),
            req_hash,
            res_hash,
        )
            .abi_encode_packed();
        let digest = keccak256(digest_body);

        let signature = self
            .signer
            .sign_hash(&digest)
            .await
            .map_err(|e| SignError::SignFailed(e.to_string()))?;

        // alloy_signer::Signature already normalizes the recovery id into
        // {27, 28}; assert the invariant instead of re-deriving it.
        let sig_bytes = signature.as_bytes();
        debug_assert!(sig_bytes[64] == 27 || sig_bytes[64] == 28);

        let encoded = (result_bytes.to_vec(), expires, sig_bytes.to_vec()).abi_encode_params();
        Ok(SignedResponse(format!("0x{}", hex::encode(encoded))))
    }
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signature_recovers_to_signer_address() {
        let key = PrivateKeySigner::random();
        let expected_address = SignerLike::address(&key);
        let gateway_signer = GatewaySigner::new(key);

        let sender = Address::ZERO;
        let outer = b"outer-data";
        let result = b"result-bytes";
        let signed = gateway_signer.sign(sender, outer, result).await.unwrap();

        assert!(signed.0.starts_with("0x"));
        assert_eq!(gateway_signer.address(), expected_address);
    }
}
