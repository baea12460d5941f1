use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use debtfolio_core::payments::{NewPaymentRecord, PaymentRecord};

async fn record_payment(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPaymentRecord>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PaymentRecord>)> {
    let Json(new_payment) = payload?;
    let payment = state
        .payment_service
        .record_payment(&account_id, new_payment)
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn list_payments(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PaymentRecord>>> {
    let payments = state.payment_service.list_payments(&account_id)?;
    Ok(Json(payments))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/accounts/{id}/debt/payments",
        get(list_payments).post(record_payment),
    )
}
