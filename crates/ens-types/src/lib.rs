//! Name types shared across the ENS gateway: DNS-wire decoding, IDNA
//! normalization, namehash derivation, and the `Binding` directory record.

pub mod binding;
pub mod error;
pub mod name;

pub use binding::Binding;
pub use error::NameError;
pub use name::NameCodec;

/// A 32-byte ENS namehash.
pub type NameHash = alloy_primitives::B256;
