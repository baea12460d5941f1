use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use debtfolio_core::balances::{BalanceEntry, BalanceSyncOutcome, PublishFailure};

/// Republishes the debt's authoritative balance to the balance ledger.
///
/// Succeeds even when the ledger rejects the write; `published` tells the
/// caller whether it landed.
async fn resync_balance(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceSyncOutcome>> {
    let outcome = state
        .balance_sync_service
        .resync_balance(&account_id)
        .await?;
    Ok(Json(outcome))
}

async fn get_balance_history(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BalanceEntry>>> {
    let entries = state
        .balance_sync_service
        .get_balance_history(&account_id)?;
    Ok(Json(entries))
}

async fn list_publish_failures(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PublishFailure>>> {
    Ok(Json(state.balance_sync_service.list_publish_failures()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts/{id}/debt/resync", post(resync_balance))
        .route("/accounts/{id}/balances", get(get_balance_history))
        .route("/balance-sync/failures", get(list_publish_failures))
}
