//! SQLite storage implementation for Debtfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `debtfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for accounts, debt instruments, payments
//!   and the balance ledger
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through the single writer actor in [`db::write_actor`].

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod balances;
pub mod debts;
pub mod payments;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accounts::AccountRepository;
pub use balances::BalanceRepository;
pub use debts::DebtRepository;
pub use payments::PaymentRepository;

// Re-export from debtfolio-core for convenience
pub use debtfolio_core::errors::{DatabaseError, Error, Result};
