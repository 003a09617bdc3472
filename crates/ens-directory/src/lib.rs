//! The authoritative name/address directory and the subdomain registrar
//! that mints names under it.

pub mod directory;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod registrar;

pub use directory::Directory;
pub use error::{DirectoryError, RegistrarError};
pub use memory::InMemoryDirectory;
pub use postgres::PgDirectory;
pub use registrar::{Registrar, Registration};
