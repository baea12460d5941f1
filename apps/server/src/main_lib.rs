use std::sync::Arc;

use crate::balance_events::QueuedBalancePublisher;
use crate::config::{BalancePublishMode, Config};
use debtfolio_core::{
    accounts::{AccountService, AccountServiceTrait},
    balances::{
        BalanceLedgerTrait, BalancePublisher, BalanceSyncService, BalanceSyncServiceTrait,
        LedgerBalancePublisher, PublishFailureLog,
    },
    debts::{DebtService, DebtServiceTrait},
    payments::{PaymentService, PaymentServiceTrait},
};
use debtfolio_storage_sqlite::{
    db::{self, write_actor},
    AccountRepository, BalanceRepository, DebtRepository, PaymentRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub debt_service: Arc<dyn DebtServiceTrait>,
    pub payment_service: Arc<dyn PaymentServiceTrait>,
    pub balance_sync_service: Arc<dyn BalanceSyncServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("DF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let debt_repository = Arc::new(DebtRepository::new(pool.clone(), writer.clone()));
    let payment_repository = Arc::new(PaymentRepository::new(pool.clone(), writer.clone()));
    let ledger: Arc<dyn BalanceLedgerTrait> =
        Arc::new(BalanceRepository::new(pool.clone(), writer.clone()));

    let failures = PublishFailureLog::default();
    let publisher: Arc<dyn BalancePublisher> = match config.balance_publish {
        BalancePublishMode::Queued => Arc::new(QueuedBalancePublisher::spawn(
            ledger.clone(),
            failures.clone(),
        )),
        BalancePublishMode::Inline => Arc::new(LedgerBalancePublisher::new(
            ledger.clone(),
            failures.clone(),
        )),
    };
    tracing::info!("Balance publishing mode: {:?}", config.balance_publish);

    let account_service = Arc::new(AccountService::new(account_repository.clone()));
    let debt_service = Arc::new(DebtService::new(
        account_repository,
        debt_repository.clone(),
        publisher.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        payment_repository.clone(),
        debt_repository.clone(),
        publisher,
    ));
    let balance_sync_service = Arc::new(BalanceSyncService::new(
        debt_repository,
        payment_repository,
        ledger,
        failures,
    ));

    Ok(Arc::new(AppState {
        account_service,
        debt_service,
        payment_service,
        balance_sync_service,
    }))
}
