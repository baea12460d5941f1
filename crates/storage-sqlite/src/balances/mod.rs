//! SQLite-backed balance ledger.

mod model;
mod repository;

pub use model::BalanceEntryDB;
pub use repository::BalanceRepository;
