//! Channel-backed balance publisher.

use std::sync::Arc;

use async_trait::async_trait;
use debtfolio_core::balances::{
    BalanceLedgerTrait, BalanceObservation, BalancePublisher, PublishFailureLog,
};
use tokio::sync::mpsc;

use super::queue_worker::balance_queue_worker;

/// Balance publisher for the web server runtime.
///
/// `publish` only enqueues; a worker spawned by [`QueuedBalancePublisher::spawn`]
/// appends to the ledger. Must be created inside a tokio runtime.
pub struct QueuedBalancePublisher {
    tx: mpsc::UnboundedSender<BalanceObservation>,
    failures: PublishFailureLog,
}

impl QueuedBalancePublisher {
    /// Creates the publisher and spawns its worker.
    pub fn spawn(ledger: Arc<dyn BalanceLedgerTrait>, failures: PublishFailureLog) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(balance_queue_worker(rx, ledger, failures.clone()));
        Self { tx, failures }
    }

    /// Creates a publisher with just the sender.
    ///
    /// The caller is responsible for draining the receiver.
    #[cfg(test)]
    pub fn with_sender(tx: mpsc::UnboundedSender<BalanceObservation>) -> Self {
        Self {
            tx,
            failures: PublishFailureLog::default(),
        }
    }
}

#[async_trait]
impl BalancePublisher for QueuedBalancePublisher {
    async fn publish(&self, observation: BalanceObservation) {
        // The worker only stops when the runtime shuts down; anything sent
        // after that is lost and recorded so a resync can repair it.
        if let Err(e) = self.tx.send(observation) {
            tracing::warn!("Failed to queue balance observation: {}", e);
            self.failures
                .record(e.0, "balance publish queue is closed".to_string());
        }
    }
}
