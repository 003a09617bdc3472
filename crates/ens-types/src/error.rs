/// Errors raised while decoding or normalizing an ENS name.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    #[error("name is not valid IDNA: {0}")]
    InvalidName(String),
}
