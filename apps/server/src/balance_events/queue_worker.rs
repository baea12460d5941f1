//! Background worker draining queued balance observations.

use std::sync::Arc;

use debtfolio_core::balances::{
    deliver_observation, BalanceLedgerTrait, BalanceObservation, PublishFailureLog,
};
use tokio::sync::mpsc;

/// Appends observations to the ledger in the order they were queued.
///
/// Rejections are logged and recorded in `failures` by
/// [`deliver_observation`]. Exits once every sender has been dropped.
pub async fn balance_queue_worker(
    mut rx: mpsc::UnboundedReceiver<BalanceObservation>,
    ledger: Arc<dyn BalanceLedgerTrait>,
    failures: PublishFailureLog,
) {
    tracing::info!("Balance publish queue worker started");

    while let Some(observation) = rx.recv().await {
        deliver_observation(ledger.as_ref(), &failures, observation).await;
    }

    tracing::info!("Balance publish queue closed, worker exiting");
}
