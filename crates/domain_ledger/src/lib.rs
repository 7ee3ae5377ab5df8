//! Ledger domain for guardian-managed allowance accounts
//!
//! This crate implements the ledger subsystem: deposits that are applied
//! exactly once per idempotency key, account balances that stay consistent
//! with the transaction log under concurrent writers, and a stable
//! cursor-paginated transaction history.
//!
//! # Architecture
//!
//! The durable state lives behind the [`LedgerStore`] port. Adapters own
//! atomicity: a single `apply_deposit` call is one atomic unit that either
//! inserts a transaction row and moves the balance, or does neither.
//!
//! - [`DepositProcessor`] validates requests, drives the store, and retries
//!   transparently on write conflicts.
//! - [`TransactionReader`] produces id-descending keyset pages that never
//!   repeat or skip entries as new deposits land.
//! - [`MemoryLedgerStore`] is the in-process adapter used by tests and local
//!   development; the PostgreSQL adapter lives in `infra_db`.

pub mod account;
pub mod cursor;
pub mod deposit;
pub mod error;
pub mod memory;
pub mod reader;
pub mod store;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use cursor::Cursor;
pub use deposit::{DepositLimits, DepositProcessor, DepositReceipt};
pub use error::LedgerError;
pub use memory::MemoryLedgerStore;
pub use reader::{TransactionPage, TransactionReader, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use store::{DepositOutcome, LedgerStore, StoreError};
pub use transaction::{Transaction, TransactionKind};
