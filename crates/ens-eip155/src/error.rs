/// Errors raised while decoding or encoding CCIP-Read ABI payloads.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("malformed outer resolve(bytes,bytes) call: {0}")]
    BadOuter(String),
    #[error("unsupported or malformed resolver function selector")]
    UnsupportedFunction,
}

/// Errors raised while producing a signed gateway response.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("signing failed: {0}")]
    SignFailed(String),
}
