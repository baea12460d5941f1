use log::{debug, info, warn};
use std::sync::Arc;

use super::balances_model::{
    authoritative_balance, BalanceEntry, BalanceObservation, BalanceSyncOutcome, PublishFailure,
};
use super::balances_publisher::{deliver_observation, PublishFailureLog};
use super::balances_traits::{BalanceLedgerTrait, BalanceSyncServiceTrait};
use crate::debts::DebtRepositoryTrait;
use crate::errors::{Error, Result};
use crate::payments::PaymentRepositoryTrait;

/// Recomputes a debt's outstanding balance and republishes it to the
/// balance ledger.
pub struct BalanceSyncService {
    debt_repository: Arc<dyn DebtRepositoryTrait>,
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
    ledger: Arc<dyn BalanceLedgerTrait>,
    failures: PublishFailureLog,
}

impl BalanceSyncService {
    pub fn new(
        debt_repository: Arc<dyn DebtRepositoryTrait>,
        payment_repository: Arc<dyn PaymentRepositoryTrait>,
        ledger: Arc<dyn BalanceLedgerTrait>,
        failures: PublishFailureLog,
    ) -> Self {
        Self {
            debt_repository,
            payment_repository,
            ledger,
            failures,
        }
    }
}

#[async_trait::async_trait]
impl BalanceSyncServiceTrait for BalanceSyncService {
    fn current_balance(&self, account_id: &str) -> Result<BalanceObservation> {
        let instrument = self
            .debt_repository
            .find_by_account(account_id)?
            .ok_or_else(|| {
                Error::NotFound(format!("No debt instrument for account {}", account_id))
            })?;
        let latest = self.payment_repository.get_latest(account_id)?;
        Ok(authoritative_balance(&instrument, latest.as_ref()))
    }

    /// Re-delivers the account's earlier failed observations in date order,
    /// then publishes the authoritative balance. Failures dated on or after
    /// the authoritative date are superseded by it and dropped.
    async fn resync_balance(&self, account_id: &str) -> Result<BalanceSyncOutcome> {
        let observation = self.current_balance(account_id)?;
        debug!(
            "Resyncing balance {} on {} for account {}",
            observation.amount, observation.balance_date, account_id
        );

        let (mut pending, superseded): (Vec<_>, Vec<_>) = self
            .failures
            .take_account(account_id)
            .into_iter()
            .partition(|failure| failure.observation.balance_date < observation.balance_date);
        if !superseded.is_empty() {
            debug!(
                "Dropping {} failed observation(s) for account {} superseded by the resync",
                superseded.len(),
                account_id
            );
        }
        pending.sort_by_key(|failure| failure.observation.balance_date);

        let attempted = pending.len();
        let mut replayed = 0;
        for failure in pending {
            if deliver_observation(self.ledger.as_ref(), &self.failures, failure.observation).await
            {
                replayed += 1;
            }
        }
        if replayed < attempted {
            warn!(
                "{} of {} earlier balance(s) for account {} are still unrecorded",
                attempted - replayed,
                attempted,
                account_id
            );
        }

        let published =
            deliver_observation(self.ledger.as_ref(), &self.failures, observation.clone()).await;
        if published {
            info!(
                "Balance for account {} resynced ({} earlier balance(s) replayed)",
                account_id, replayed
            );
        }

        Ok(BalanceSyncOutcome {
            observation,
            published,
            replayed,
        })
    }

    fn get_balance_history(&self, account_id: &str) -> Result<Vec<BalanceEntry>> {
        self.ledger.list_by_account(account_id)
    }

    fn list_publish_failures(&self) -> Vec<PublishFailure> {
        self.failures.snapshot()
    }
}
