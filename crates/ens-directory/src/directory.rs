//! The authoritative name/address directory contract.
//!
//! Grounded on the original gateway's `internal/store/store.go` interface and
//! `internal/store/pg.go` implementation (pgxpool-backed, synchronous
//! migration before traffic). Names are stored and queried lowercase;
//! addresses are stored checksum-case as supplied.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::error::DirectoryError;

/// Forward/reverse name-address directory with at-most-one-name-per-address
/// semantics on the reverse index (last-wins, see `DESIGN.md`).
#[async_trait]
pub trait Directory: Send + Sync {
    /// Inserts a new binding. Fails with [`DirectoryError::Duplicate`] if
    /// `name` is already bound.
    async fn register(&self, name: &str, address: Address) -> Result<(), DirectoryError>;

    /// Overwrites an existing binding. Fails with
    /// [`DirectoryError::NameNotFound`] if `name` is absent.
    async fn update(&self, name: &str, address: Address) -> Result<(), DirectoryError>;

    /// Inserts or overwrites a binding unconditionally.
    async fn upsert(&self, name: &str, address: Address) -> Result<(), DirectoryError>;

    /// Forward lookup: `name -> address`.
    async fn lookup_name(&self, name: &str) -> Result<Address, DirectoryError>;

    /// Reverse lookup: `address -> name`.
    async fn reverse_lookup(&self, address: Address) -> Result<String, DirectoryError>;
}
