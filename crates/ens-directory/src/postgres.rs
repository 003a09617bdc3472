//! Postgres-backed `Directory`.
//!
//! Grounded on the original gateway's `internal/store/pg.go`: a pooled
//! connection, migrations run synchronously before the pool is handed to the
//! server, and uniqueness enforced by a database constraint rather than a
//! pre-check/insert race. The `sqlx`/`postgres`/`migrate`/`runtime-tokio`
//! feature set mirrors the one used by the worldcoin ENS gateway example.

use alloy_primitives::Address;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::directory::Directory;
use crate::error::DirectoryError;

/// Postgres unique_violation SQLSTATE, used to detect a racing `register`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Connects and runs pending migrations synchronously. Must complete
    /// before the server starts accepting traffic.
    pub async fn connect(database_url: &str) -> Result<Self, DirectoryError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| DirectoryError::Backend(e.to_string()))?;
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .map_err(|e| DirectoryError::Backend(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[async_trait]
impl Directory for PgDirectory {
    async fn register(&self, name: &str, address: Address) -> Result<(), DirectoryError> {
        let lower = name.to_lowercase();
        let checksum = address.to_checksum(None);
        sqlx::query!(
            "INSERT INTO bindings (name, address) VALUES ($1, $2)",
            lower,
            checksum,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DirectoryError::Duplicate
            } else {
                DirectoryError::Backend(e.to_string())
            }
        })?;
        Ok(())
    }

    async fn update(&self, name: &str, address: Address) -> Result<(), DirectoryError> {
        let lower = name.to_lowercase();
        let checksum = address.to_checksum(None);
        let result = sqlx::query!(
            "UPDATE bindings SET address = $2, updated_at = now() WHERE name = $1",
            lower,
            checksum,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DirectoryError::Backend(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DirectoryError::NameNotFound);
        }
        Ok(())
    }

    async fn upsert(&self, name: &str, address: Address) -> Result<(), DirectoryError> {
        let lower = name.to_lowercase();
        let checksum = address.to_checksum(None);
        sqlx::query!(
            r#"
            INSERT INTO bindings (name, address) VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET address = EXCLUDED.address, updated_at = now()
            "#,
            lower,
            checksum,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DirectoryError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn lookup_name(&self, name: &str) -> Result<Address, DirectoryError> {
        let lower = name.to_lowercase();
        let row = sqlx::query!("SELECT address FROM bindings WHERE name = $1", lower)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DirectoryError::Backend(e.to_string()))?
            .ok_or(DirectoryError::NameNotFound)?;
        row.address
            .parse()
            .map_err(|e: alloy_primitives::AddressError| DirectoryError::Backend(e.to_string()))
    }

    async fn reverse_lookup(&self, address: Address) -> Result<String, DirectoryError> {
        let checksum = address.to_checksum(None);
        let row = sqlx::query!(
            "SELECT name FROM bindings WHERE lower(address) = lower($1) ORDER BY updated_at DESC LIMIT 1",
            checksum,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Backend(e.to_string()))?
        .ok_or(DirectoryError::AddressNotFound)?;
        Ok(row.name)
    }
}
