use log::{debug, info};
use std::sync::Arc;

use super::amortization::{generate_schedule, summarize_schedule};
use super::debts_model::{AmortizationScheduleResponse, DebtInstrument, NewDebtInstrument};
use super::debts_traits::{DebtRepositoryTrait, DebtServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::balances::{BalanceObservation, BalancePublisher};
use crate::constants::balance_notes;
use crate::errors::{Error, Result};

/// Service for debt instruments and their amortization schedules
pub struct DebtService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    debt_repository: Arc<dyn DebtRepositoryTrait>,
    publisher: Arc<dyn BalancePublisher>,
}

impl DebtService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        debt_repository: Arc<dyn DebtRepositoryTrait>,
        publisher: Arc<dyn BalancePublisher>,
    ) -> Self {
        Self {
            account_repository,
            debt_repository,
            publisher,
        }
    }
}

#[async_trait::async_trait]
impl DebtServiceTrait for DebtService {
    async fn create_debt_instrument(
        &self,
        account_id: &str,
        new_instrument: NewDebtInstrument,
    ) -> Result<DebtInstrument> {
        let terms = new_instrument.into_terms()?;

        // Fails with NotFound for an unknown account.
        self.account_repository.get_by_id(account_id)?;

        if self.debt_repository.find_by_account(account_id)?.is_some() {
            return Err(Error::Conflict(format!(
                "Account {} already has a debt instrument",
                account_id
            )));
        }

        let instrument = self.debt_repository.create(account_id, terms).await?;
        info!(
            "Created {} of {} for account {}, maturing {}",
            instrument.terms.kind.as_str(),
            instrument.terms.original_amount,
            account_id,
            instrument.terms.maturity_date
        );

        self.publisher
            .publish(BalanceObservation::new(
                account_id,
                -instrument.terms.original_amount,
                instrument.terms.start_date,
                balance_notes::DEBT_INITIATED,
            ))
            .await;

        Ok(instrument)
    }

    fn get_debt_instrument(&self, account_id: &str) -> Result<DebtInstrument> {
        self.debt_repository
            .find_by_account(account_id)?
            .ok_or_else(|| {
                Error::NotFound(format!("No debt instrument for account {}", account_id))
            })
    }

    fn get_amortization_schedule(&self, account_id: &str) -> Result<AmortizationScheduleResponse> {
        let instrument = self.get_debt_instrument(account_id)?;
        let entries = generate_schedule(&instrument.terms);
        let summary = summarize_schedule(&instrument.terms, &entries);
        debug!(
            "Projected {} payments for account {}",
            entries.len(),
            account_id
        );
        Ok(AmortizationScheduleResponse {
            account_id: instrument.account_id,
            entries,
            summary,
        })
    }
}
