//! Best-effort balance publication.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};

use super::balances_model::{BalanceObservation, PublishFailure};
use super::balances_traits::{BalanceLedgerTrait, BalancePublisher};

const DEFAULT_FAILURE_LOG_CAPACITY: usize = 500;

/// Bounded in-memory log of ledger rejections.
///
/// Cloning shares the underlying log. Oldest entries are evicted first once
/// the capacity is reached.
#[derive(Clone)]
pub struct PublishFailureLog {
    entries: Arc<Mutex<VecDeque<PublishFailure>>>,
    capacity: usize,
}

impl Default for PublishFailureLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_FAILURE_LOG_CAPACITY)
    }
}

impl PublishFailureLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(64)))),
            capacity: capacity.max(1),
        }
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<PublishFailure>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn record(&self, observation: BalanceObservation, error: impl Into<String>) {
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(PublishFailure {
            observation,
            error: error.into(),
            failed_at: Utc::now().naive_utc(),
        });
    }

    /// Removes and returns the failures recorded for `account_id`, oldest
    /// first. Failures for other accounts stay in the log.
    pub fn take_account(&self, account_id: &str) -> Vec<PublishFailure> {
        let mut entries = self.lock();
        let (taken, kept): (Vec<_>, Vec<_>) = entries
            .drain(..)
            .partition(|failure| failure.observation.account_id == account_id);
        entries.extend(kept);
        taken
    }

    /// Failures in the order they happened.
    pub fn snapshot(&self) -> Vec<PublishFailure> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Appends to the ledger inline, swallowing and logging failures.
pub struct LedgerBalancePublisher {
    ledger: Arc<dyn BalanceLedgerTrait>,
    failures: PublishFailureLog,
}

impl LedgerBalancePublisher {
    pub fn new(ledger: Arc<dyn BalanceLedgerTrait>, failures: PublishFailureLog) -> Self {
        Self { ledger, failures }
    }
}

#[async_trait]
impl BalancePublisher for LedgerBalancePublisher {
    async fn publish(&self, observation: BalanceObservation) {
        deliver_observation(self.ledger.as_ref(), &self.failures, observation).await;
    }
}

/// Appends one observation, logging and recording a rejection.
///
/// Shared by every publisher so failures are handled the same way whether
/// delivery happens inline or from a background worker.
pub async fn deliver_observation(
    ledger: &dyn BalanceLedgerTrait,
    failures: &PublishFailureLog,
    observation: BalanceObservation,
) -> bool {
    match ledger.append(observation.clone()).await {
        Ok(entry) => {
            debug!(
                "Recorded balance {} for account {} on {} ({})",
                entry.amount, entry.account_id, entry.balance_date, observation.notes
            );
            true
        }
        Err(e) => {
            error!(
                "Failed to record balance {} for account {} on {} ({}): {}. Run a balance resync to repair.",
                observation.amount,
                observation.account_id,
                observation.balance_date,
                observation.notes,
                e
            );
            failures.record(observation, e.to_string());
            false
        }
    }
}
