/// Errors raised by a [`crate::Directory`] implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("name already registered")]
    Duplicate,
    #[error("name not found")]
    NameNotFound,
    #[error("address not found")]
    AddressNotFound,
    #[error("directory backend failure: {0}")]
    Backend(String),
}

/// Errors raised by [`crate::Registrar`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistrarError {
    #[error("subdomain must match ^[a-z][a-z0-9]*$")]
    InvalidSubdomain,
    #[error("exhausted auto-alias attempts")]
    AutoAliasExhausted,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
