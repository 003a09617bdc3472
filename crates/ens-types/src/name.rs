//! ENS name decoding, IDNA normalization and namehash derivation.
//!
//! Grounded on the original gateway's `pkg/namehash.go` (IDNA config, leading-dot
//! preservation, right-to-left recursive keccak) and on the decode-wire scanner
//! from the same package, reimplemented with typed errors instead of panics.

use alloy_primitives::{B256, keccak256};

use crate::error::NameError;

/// Stateless codec for ENS names: DNS-wire decoding, IDNA normalization, namehash.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameCodec;

impl NameCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a DNS-wire-format name into its dotted string form.
    ///
    /// Tolerant scanner: any byte `< 32` is a label boundary, `0` is skipped,
    /// everything else accumulates into the current label. This matches the
    /// reference decoder rather than strict RFC-1035 length-prefix parsing
    /// (see the open question on decoder strictness).
    pub fn decode_wire(&self, bytes: &[u8]) -> String {
        let mut labels = Vec::new();
        let mut current = Vec::new();
        for &b in bytes {
            if b < 32 {
                if !current.is_empty() {
                    labels.push(String::from_utf8_lossy(&current).into_owned());
                    current.clear();
                }
            } else {
                current.push(b);
            }
        }
        if !current.is_empty() {
            labels.push(String::from_utf8_lossy(&current).into_owned());
        }
        labels.join(".")
    }

    /// IDNA-normalizes a name for lookup: non-transitional, hyphen checks and
    /// DNS length/label validation disabled. A leading `.` in the input is
    /// preserved across normalization.
    pub fn normalize(&self, name: &str) -> Result<String, NameError> {
        let (leading_dot, rest) = match name.strip_prefix('.') {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        if rest.is_empty() {
            return Ok(if leading_dot { ".".to_string() } else { String::new() });
        }
        let config = idna::Config::default()
            .transitional_processing(false)
            .use_std3_ascii_rules(false)
            .verify_dns_length(false)
            .check_hyphens(false);
        let normalized = config
            .to_ascii(rest)
            .map_err(|e| NameError::InvalidName(format!("{e}")))?;
        Ok(if leading_dot {
            format!(".{normalized}")
        } else {
            normalized
        })
    }

    /// Computes the ENS namehash. Empty name hashes to the zero node.
    pub fn namehash(&self, name: &str) -> B256 {
        if name.is_empty() {
            return B256::ZERO;
        }
        let mut labels: Vec<&str> = name.split('.').collect();
        labels.reverse();
        let mut node = B256::ZERO;
        for label in labels {
            let label_hash = keccak256(label.as_bytes());
            node = keccak256([node.as_slice(), label_hash.as_slice()].concat());
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namehash_empty_is_zero() {
        let codec = NameCodec::new();
        assert_eq!(codec.namehash(""), B256::ZERO);
    }

    #[test]
    fn namehash_eth_vector() {
        let codec = NameCodec::new();
        let expected: B256 =
            "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
                .parse()
                .unwrap();
        assert_eq!(codec.namehash("eth"), expected);
    }

    #[test]
    fn namehash_foo_eth_vector() {
        let codec = NameCodec::new();
        let expected: B256 =
            "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
                .parse()
                .unwrap();
        assert_eq!(codec.namehash("foo.eth"), expected);
    }

    #[test]
    fn decode_wire_vector() {
        let codec = NameCodec::new();
        let wire = [0x03, b'f', b'o', b'o', 0x03, b'e', b't', b'h', 0x00];
        assert_eq!(codec.decode_wire(&wire), "foo.eth");
    }

    #[test]
    fn decode_wire_skips_control_bytes_anywhere() {
        let codec = NameCodec;
        let wire = [0x01, b'a', 0x01, b'b', 0x00];
        assert_eq!(codec.decode_wire(&wire), "a.b");
    }

    #[test]
    fn namehash_round_trip_after_normalize() {
        let codec = NameCodec::new();
        let normalized = codec.normalize("Foo.ETH").unwrap();
        assert_eq!(codec.namehash(&normalized), codec.namehash("foo.eth"));
    }
}
