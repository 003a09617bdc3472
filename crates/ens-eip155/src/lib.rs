//! CCIP-Read ABI decode/encode and EIP-191 off-chain answer signing.

pub mod abi;
pub mod error;
pub mod signer;

pub use abi::{AbiCodec, InnerCall};
pub use error::{AbiError, SignError};
pub use signer::{GatewaySigner, SignedResponse, SignerLike};
