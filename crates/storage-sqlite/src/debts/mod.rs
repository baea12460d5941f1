//! SQLite storage implementation for debt instruments.

mod model;
mod repository;

pub use model::DebtInstrumentDB;
pub use repository::DebtRepository;
