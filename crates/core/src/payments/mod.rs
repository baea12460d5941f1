//! Payments module - the append-only ledger of real-world payments made
//! against a debt instrument.

mod payments_model;
mod payments_service;
mod payments_traits;


pub use payments_model::{ensure_appends_in_order, next_balance, NewPaymentRecord, PaymentRecord};
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
