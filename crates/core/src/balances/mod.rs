//! Balances module - the Balance Ledger collaborator contract, the
//! best-effort publisher that feeds it, and the resync bridge.

mod balances_model;
mod balances_publisher;
mod balances_service;
mod balances_traits;


pub use balances_model::{
    authoritative_balance, BalanceEntry, BalanceObservation, BalanceSyncOutcome, PublishFailure,
};
pub use balances_publisher::{deliver_observation, LedgerBalancePublisher, PublishFailureLog};
pub use balances_service::BalanceSyncService;
pub use balances_traits::{BalanceLedgerTrait, BalancePublisher, BalanceSyncServiceTrait};
