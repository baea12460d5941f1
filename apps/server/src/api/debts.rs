use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use debtfolio_core::debts::{AmortizationScheduleResponse, DebtInstrument, NewDebtInstrument};

async fn create_debt_instrument(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDebtInstrument>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DebtInstrument>)> {
    let Json(new_instrument) = payload?;
    let instrument = state
        .debt_service
        .create_debt_instrument(&account_id, new_instrument)
        .await?;
    Ok((StatusCode::CREATED, Json(instrument)))
}

async fn get_debt_instrument(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DebtInstrument>> {
    let instrument = state.debt_service.get_debt_instrument(&account_id)?;
    Ok(Json(instrument))
}

async fn get_amortization_schedule(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AmortizationScheduleResponse>> {
    let schedule = state.debt_service.get_amortization_schedule(&account_id)?;
    Ok(Json(schedule))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts/{id}/debt",
            get(get_debt_instrument).post(create_debt_instrument),
        )
        .route("/accounts/{id}/debt/schedule", get(get_amortization_schedule))
}
