use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::AccountListQuery};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use debtfolio_core::accounts::{Account, NewAccount};

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AccountListQuery>,
) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state.account_service.list_accounts(query.is_active)?;
    Ok(Json(accounts))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewAccount>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let Json(new_account) = payload?;
    let account = state.account_service.create_account(new_account).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Account>> {
    let account = state.account_service.get_account(&id)?;
    Ok(Json(account))
}

async fn delete_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).delete(delete_account))
}
