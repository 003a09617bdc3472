//! Subdomain registration with auto-alias collision handling.
//!
//! Grounded on the original gateway's `internal/api/register.go`:
//! `domainSuffix`, `validSubdomain`, and the 90-iteration `rand.Intn(90)+10`
//! auto-choose loop relying on the directory's unique constraint rather than
//! a pre-check/insert race.

use alloy_primitives::Address;
use rand::Rng;

use crate::directory::Directory;
use crate::error::{DirectoryError, RegistrarError};

const MAX_AUTO_ALIAS_ATTEMPTS: u32 = 90;

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub address: Address,
    pub auto: bool,
}

/// Validates subdomain hints and mints fully-qualified names under a
/// configured parent suffix (e.g. `.sarafu.eth`).
pub struct Registrar<'a, D: Directory> {
    directory: &'a D,
    parent_suffix: String,
}

impl<'a, D: Directory> Registrar<'a, D> {
    pub fn new(directory: &'a D, parent_suffix: impl Into<String>) -> Self {
        Self {
            directory,
            parent_suffix: parent_suffix.into(),
        }
    }

    /// Strips the parent suffix if present, rejects names with remaining
    /// dots, and validates `^[a-z][a-z0-9]*$` after lowercasing.
    fn extract_subdomain(&self, hint: &str) -> Result<String, RegistrarError> {
        let stripped = hint
            .strip_suffix(self.parent_suffix.as_str())
            .unwrap_or(hint);
        if stripped.contains('.') {
            return Err(RegistrarError::InvalidSubdomain);
        }
        let lower = stripped.to_lowercase();
        if !is_valid_subdomain(&lower) {
            return Err(RegistrarError::InvalidSubdomain);
        }
        Ok(lower)
    }

    pub async fn register(
        &self,
        hint: &str,
        address: Address,
    ) -> Result<Registration, RegistrarError> {
        let subdomain = self.extract_subdomain(hint)?;
        let fqn = format!("{subdomain}{}", self.parent_suffix);

        match self.directory.lookup_name(&fqn).await {
            Err(DirectoryError::NameNotFound) => match self.directory.register(&fqn, address).await
            {
                Ok(()) => {
                    return Ok(Registration {
                        name: fqn,
                        address,
                        auto: false,
                    });
                }
                Err(DirectoryError::Duplicate) => {
                    // Lost a race with a concurrent registration; fall through
                    // to the auto-alias loop below.
                }
                Err(other) => return Err(other.into()),
            },
            Ok(_existing) => {
                // Name already taken; fall through to auto-alias.
            }
            Err(other) => return Err(other.into()),
        }

        self.auto_alias(&subdomain, address).await
    }

    async fn auto_alias(
        &self,
        subdomain: &str,
        address: Address,
    ) -> Result<Registration, RegistrarError> {
        let mut rng = rand::rng();
        for _ in 0..MAX_AUTO_ALIAS_ATTEMPTS {
            let n: u32 = rng.random_range(10..=99);
            let candidate = format!("{subdomain}{n}{}", self.parent_suffix);
            match self.directory.register(&candidate, address).await {
                Ok(()) => {
                    return Ok(Registration {
                        name: candidate,
                        address,
                        auto: true,
                    });
                }
                Err(DirectoryError::Duplicate) => continue,
                Err(other) => return Err(other.into()),
            }
        }
        Err(RegistrarError::AutoAliasExhausted)
    }
}

fn is_valid_subdomain(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDirectory;
    use alloy_primitives::address;

    #[test]
    fn valid_subdomain_alphabet() {
        assert!(is_valid_subdomain("alice"));
        assert!(is_valid_subdomain("alice99"));
        assert!(!is_valid_subdomain("99alice"));
        assert!(!is_valid_subdomain("alice-bob"));
        assert!(!is_valid_subdomain(""));
    }

    #[tokio::test]
    async fn register_fresh_subdomain() {
        let directory = InMemoryDirectory::new();
        let registrar = Registrar::new(&directory, ".sarafu.eth");
        let addr = address!("000000000000000000000000000000000000aa");
        let registration = registrar.register("alice", addr).await.unwrap();
        assert_eq!(registration.name, "alice.sarafu.eth");
        assert!(!registration.auto);
    }

    #[tokio::test]
    async fn register_collision_triggers_auto_alias() {
        let directory = InMemoryDirectory::new();
        directory
            .register(
                "alice.sarafu.eth",
                address!("000000000000000000000000000000000000aa"),
            )
            .await
            .unwrap();
        let registrar = Registrar::new(&directory, ".sarafu.eth");
        let addr = address!("000000000000000000000000000000000000bb");
        let registration = registrar.register("alice", addr).await.unwrap();
        assert!(registration.auto);
        assert!(registration.name.starts_with("alice"));
        assert!(registration.name.ends_with(".sarafu.eth"));
        let suffix = registration
            .name
            .strip_prefix("alice")
            .unwrap()
            .strip_suffix(".sarafu.eth")
            .unwrap();
        let n: u32 = suffix.parse().unwrap();
        assert!((10..=99).contains(&n));
        assert_eq!(directory.lookup_name(&registration.name).await.unwrap(), addr);
    }

    #[tokio::test]
    async fn rejects_invalid_hint() {
        let directory = InMemoryDirectory::new();
        let registrar = Registrar::new(&directory, ".sarafu.eth");
        let addr = address!("000000000000000000000000000000000000aa");
        let err = registrar.register("99alice", addr).await.unwrap_err();
        assert!(matches!(err, RegistrarError::InvalidSubdomain));
    }

    #[tokio::test]
    async fn rejects_nested_subdomain() {
        let directory = InMemoryDirectory::new();
        let registrar = Registrar::new(&directory, ".sarafu.eth");
        let addr = address!("000000000000000000000000000000000000aa");
        let err = registrar.register("a.b", addr).await.unwrap_err();
        assert!(matches!(err, RegistrarError::InvalidSubdomain));
    }
}
