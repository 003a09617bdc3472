use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// A directory record: a fully-qualified ENS name bound to an EVM address.
///
/// `name` is always stored and compared lowercase. `address` keeps whatever
/// casing it was supplied with (expected to be EIP-55 checksum) but is
/// looked up case-insensitively by the directory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub address: Address,
}

impl Binding {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}
