//! SQLite storage implementation for the payment ledger.

mod model;
mod repository;

pub use model::PaymentDB;
pub use repository::PaymentRepository;
