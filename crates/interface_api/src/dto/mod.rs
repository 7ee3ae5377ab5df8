//! Request and response data transfer objects

pub mod accounts;
pub mod transactions;
