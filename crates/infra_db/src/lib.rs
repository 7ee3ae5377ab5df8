//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL infrastructure for the allowance
//! ledger, implemented on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`LedgerRepository`] is the
//! durable implementation of the `LedgerStore` port, keeping SQL and
//! SQLSTATE handling out of the domain layer. Every deposit runs inside a
//! single database transaction with the account row locked, so balances
//! survive concurrent writers without lost updates.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, LedgerRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/allowance")).await?;
//! infra_db::MIGRATOR.run(&pool).await?;
//! let store = LedgerRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::ledger::LedgerRepository;

/// Embedded schema migrations, applied at startup and in tests
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
