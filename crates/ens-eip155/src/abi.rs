//! ABI decode/encode of nested ENS resolver calls.
//!
//! Grounded on the worldcoin CCIP-Read gateway
//! (`other_examples/.../ens_gateway.rs.rs`), which decodes `resolve(bytes,bytes)`
//! via `SolCall::abi_decode` and encodes results via `SolValue::abi_encode`, and
//! on `tomusdrw-rust-web3`'s `ADDR_INTERFACE_ID`/`BLOCKCHAIN_ADDR_INTERFACE_ID`
//! constants, which confirm the two selectors this gateway dispatches on.

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_sol_types::SolValue;

use crate::error::AbiError;

/// `resolve(bytes,bytes)`, EIP-3668.
pub const RESOLVE_SELECTOR: [u8; 4] = [0x90, 0x61, 0xb9, 0x23];
/// `addr(bytes32)`, EIP-137.
pub const ADDR_SELECTOR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde];
/// `addr(bytes32,uint256)`, EIP-2304 multicoin.
pub const ADDR_MULTICOIN_SELECTOR: [u8; 4] = [0xf1, 0xcb, 0x7e, 0x06];

/// A decoded inner ENS resolver call, dispatched by selector.
///
/// Re-architected as a tagged variant rather than threading selector hex
/// strings through a lookup map: `decode_inner` is the single place that
/// knows about wire selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerCall {
    Addr { node: B256 },
    AddrMulticoin { node: B256, coin: U256 },
}

impl InnerCall {
    pub fn node(&self) -> B256 {
        match self {
            InnerCall::Addr { node } => *node,
            InnerCall::AddrMulticoin { node, .. } => *node,
        }
    }
}

/// Stateless codec for the outer CCIP-Read call and the inner resolver call.
#[derive(Debug, Clone, Copy)]
pub struct AbiCodec {
    /// The SLIP-44 coin type this deployment accepts for `addr(bytes32,uint256)`.
    pub supported_coin_type: U256,
}

impl AbiCodec {
    pub fn new(supported_coin_type: u64) -> Self {
        Self {
            supported_coin_type: U256::from(supported_coin_type),
        }
    }

    /// Decodes `resolve(bytes name, bytes data)`, accepting either the full
    /// calldata (4-byte selector prefix) or the bare argument region.
    pub fn decode_outer(&self, data: &[u8]) -> Result<(Vec<u8>, Vec<u8>), AbiError> {
        let params = if data.len() >= 4 && data[0..4] == RESOLVE_SELECTOR {
            &data[4..]
        } else {
            data
        };
        let (name, inner) = <(Bytes, Bytes)>::abi_decode_params(params)
            .map_err(|e| AbiError::BadOuter(e.to_string()))?;
        Ok((name.to_vec(), inner.to_vec()))
    }

    /// Decodes the inner resolver call by selector.
    pub fn decode_inner(&self, data: &[u8]) -> Result<InnerCall, AbiError> {
        if data.len() < 4 {
            return Err(AbiError::UnsupportedFunction);
        }
        let selector: [u8; 4] = data[0..4].try_into().unwrap();
        let args = &data[4..];
        match selector {
            ADDR_SELECTOR => {
                let (node,) = <(B256,)>::abi_decode_params(args)
                    .map_err(|_| AbiError::UnsupportedFunction)?;
                Ok(InnerCall::Addr { node })
            }
            ADDR_MULTICOIN_SELECTOR => {
                let (node, coin) = <(B256, U256)>::abi_decode_params(args)
                    .map_err(|_| AbiError::UnsupportedFunction)?;
                if coin != self.supported_coin_type {
                    return Err(AbiError::UnsupportedFunction);
                }
                Ok(InnerCall::AddrMulticoin { node, coin })
            }
            _ => Err(AbiError::UnsupportedFunction),
        }
    }

    /// ABI-packs the answer to an `addr(bytes32)` call: a left-padded address.
    pub fn encode_addr_result(&self, address: Address) -> Vec<u8> {
        address.abi_encode()
    }

    /// ABI-packs the answer to an `addr(bytes32,uint256)` call: the address
    /// as a `bytes` value.
    pub fn encode_multicoin_result(&self, address: Address) -> Vec<u8> {
        let raw: Bytes = Bytes::copy_from_slice(address.as_slice());
        raw.abi_encode()
    }

    /// Encodes the answer for whichever inner call produced it.
    pub fn encode_result(&self, call: &InnerCall, address: Address) -> Vec<u8> {
        match call {
            InnerCall::Addr { .. } => self.encode_addr_result(address),
            InnerCall::AddrMulticoin { .. } => self.encode_multicoin_result(address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ens_types::NameCodec;

    #[test]
    fn decode_inner_addr_selector() {
        let codec = AbiCodec::new(2147525868);
        let node = NameCodec::new().namehash("alice.sarafu.eth");
        let mut data = ADDR_SELECTOR.to_vec();
        data.extend_from_slice(node.as_slice());
        let call = codec.decode_inner(&data).unwrap();
        assert_eq!(call, InnerCall::Addr { node });
    }

    #[test]
    fn decode_inner_rejects_unknown_selector() {
        let codec = AbiCodec::new(2147525868);
        let data = [0xde, 0xad, 0xbe, 0xef, 0u8].to_vec();
        assert!(matches!(
            codec.decode_inner(&data),
            Err(AbiError::UnsupportedFunction)
        ));
    }

    #[test]
    fn decode_inner_rejects_wrong_coin_type() {
        let codec = AbiCodec::new(2147525868);
        let node = B256::ZERO;
        let coin = U256::from(60u64); // ETH mainnet, not Celo
        let mut data = ADDR_MULTICOIN_SELECTOR.to_vec();
        data.extend_from_slice(node.as_slice());
        data.extend_from_slice(&coin.to_be_bytes::<32>());
        assert!(matches!(
            codec.decode_inner(&data),
            Err(AbiError::UnsupportedFunction)
        ));
    }
}
