//! In-memory `Directory` backed by `DashMap`.
//!
//! Used by the test suite and by deployments that don't need durable
//! storage. `dashmap` is already part of the teacher's dependency stack.

use alloy_primitives::Address;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::directory::Directory;
use crate::error::DirectoryError;

/// An in-memory directory. Reverse index policy is last-wins: the most
/// recent `register`/`update`/`upsert` for an address replaces any prior
/// reverse binding (see `DESIGN.md` on the reverse-index open question).
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    forward: DashMap<String, Address>,
    reverse: DashMap<Address, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, name: &str, address: Address) {
        let lower = name.to_lowercase();
        self.forward.insert(lower.clone(), address);
        self.reverse.insert(address, lower);
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn register(&self, name: &str, address: Address) -> Result<(), DirectoryError> {
        let lower = name.to_lowercase();
        if self.forward.contains_key(&lower) {
            return Err(DirectoryError::Duplicate);
        }
        self.set(name, address);
        Ok(())
    }

    async fn update(&self, name: &str, address: Address) -> Result<(), DirectoryError> {
        let lower = name.to_lowercase();
        if !self.forward.contains_key(&lower) {
            return Err(DirectoryError::NameNotFound);
        }
        self.set(name, address);
        Ok(())
    }

    async fn upsert(&self, name: &str, address: Address) -> Result<(), DirectoryError> {
        self.set(name, address);
        Ok(())
    }

    async fn lookup_name(&self, name: &str) -> Result<Address, DirectoryError> {
        let lower = name.to_lowercase();
        self.forward
            .get(&lower)
            .map(|entry| *entry.value())
            .ok_or(DirectoryError::NameNotFound)
    }

    async fn reverse_lookup(&self, address: Address) -> Result<String, DirectoryError> {
        self.reverse
            .get(&address)
            .map(|entry| entry.value().clone())
            .ok_or(DirectoryError::AddressNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[tokio::test]
    async fn register_then_lookup() {
        let directory = InMemoryDirectory::new();
        let addr = address!("000000000000000000000000000000000000aa");
        directory.register("alice.sarafu.eth", addr).await.unwrap();
        assert_eq!(
            directory.lookup_name("ALICE.sarafu.eth").await.unwrap(),
            addr
        );
        assert_eq!(
            directory.reverse_lookup(addr).await.unwrap(),
            "alice.sarafu.eth"
        );
    }

    #[tokio::test]
    async fn register_twice_is_duplicate() {
        let directory = InMemoryDirectory::new();
        let addr = address!("000000000000000000000000000000000000aa");
        directory.register("alice.sarafu.eth", addr).await.unwrap();
        let err = directory
            .register("alice.sarafu.eth", addr)
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Duplicate));
    }

    #[tokio::test]
    async fn reverse_index_last_wins() {
        let directory = InMemoryDirectory::new();
        let addr = address!("000000000000000000000000000000000000aa");
        directory.register("alice.sarafu.eth", addr).await.unwrap();
        directory.register("alice99.sarafu.eth", addr).await.unwrap();
        assert_eq!(
            directory.reverse_lookup(addr).await.unwrap(),
            "alice99.sarafu.eth"
        );
    }

    #[tokio::test]
    async fn update_requires_existing_name() {
        let directory = InMemoryDirectory::new();
        let addr = address!("000000000000000000000000000000000000aa");
        let err = directory.update("nobody.sarafu.eth", addr).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NameNotFound));
    }
}
