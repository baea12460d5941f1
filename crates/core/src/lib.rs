//! Debtfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the debt amortization and balance synchronization
//! logic. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod balances;
pub mod constants;
pub mod debts;
pub mod errors;
pub mod payments;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
