//! Repository implementations
//!
//! Each repository owns the SQL for one aggregate and exposes it through
//! the matching domain port.

pub mod ledger;

pub use ledger::LedgerRepository;
