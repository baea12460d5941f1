//! Balance ledger, publisher and sync service traits.

use async_trait::async_trait;

use super::balances_model::{BalanceEntry, BalanceObservation, BalanceSyncOutcome, PublishFailure};
use crate::errors::Result;

/// The Balance Ledger collaborator.
///
/// Records point-in-time balance observations for an account, independent
/// of the engine's own payment history.
#[async_trait]
pub trait BalanceLedgerTrait: Send + Sync {
    /// Records an observation. An observation for an account and date that
    /// already has an entry replaces it.
    async fn append(&self, observation: BalanceObservation) -> Result<BalanceEntry>;

    /// Entries for an account, newest first.
    fn list_by_account(&self, account_id: &str) -> Result<Vec<BalanceEntry>>;
}

/// Fire-and-forget delivery of balance observations to the ledger.
///
/// `publish` has no error channel: implementations log failures and keep
/// them in a [`PublishFailureLog`](super::PublishFailureLog). Callers never
/// roll back or fail because of a publication.
#[async_trait]
pub trait BalancePublisher: Send + Sync {
    async fn publish(&self, observation: BalanceObservation);
}

/// Trait defining the Balance Sync Bridge operations.
#[async_trait]
pub trait BalanceSyncServiceTrait: Send + Sync {
    /// The balance a resync would publish. Fails with `NotFound` when the
    /// account has no debt instrument.
    fn current_balance(&self, account_id: &str) -> Result<BalanceObservation>;

    /// Republishes the authoritative balance. Idempotent.
    async fn resync_balance(&self, account_id: &str) -> Result<BalanceSyncOutcome>;

    fn get_balance_history(&self, account_id: &str) -> Result<Vec<BalanceEntry>>;

    /// Publications the ledger rejected and that no resync has repaired yet.
    fn list_publish_failures(&self) -> Vec<PublishFailure>;
}
