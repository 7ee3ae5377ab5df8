//! Core Kernel - Foundational types and utilities for the allowance ledger
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money represented as integer minor currency units (no floating point, ever)
//! - Strongly-typed numeric identifiers

pub mod identifiers;
pub mod money;

pub use identifiers::{AccountId, DependentId, TransactionId};
pub use money::{Money, MoneyError};
