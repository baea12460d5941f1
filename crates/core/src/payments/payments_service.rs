use log::debug;
use std::sync::Arc;

use super::payments_model::{NewPaymentRecord, PaymentRecord};
use super::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
use crate::balances::{BalanceObservation, BalancePublisher};
use crate::constants::balance_notes;
use crate::debts::DebtRepositoryTrait;
use crate::errors::{Error, Result};

/// Service for recording payments against debt instruments
pub struct PaymentService {
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
    debt_repository: Arc<dyn DebtRepositoryTrait>,
    publisher: Arc<dyn BalancePublisher>,
}

impl PaymentService {
    pub fn new(
        payment_repository: Arc<dyn PaymentRepositoryTrait>,
        debt_repository: Arc<dyn DebtRepositoryTrait>,
        publisher: Arc<dyn BalancePublisher>,
    ) -> Self {
        Self {
            payment_repository,
            debt_repository,
            publisher,
        }
    }
}

#[async_trait::async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn record_payment(
        &self,
        account_id: &str,
        new_payment: NewPaymentRecord,
    ) -> Result<PaymentRecord> {
        new_payment.validate()?;

        let instrument = self
            .debt_repository
            .find_by_account(account_id)?
            .ok_or_else(|| {
                Error::NotFound(format!("No debt instrument for account {}", account_id))
            })?;

        let record = self
            .payment_repository
            .append_payment(
                account_id,
                new_payment,
                -instrument.terms.original_amount,
            )
            .await?;
        debug!(
            "Recorded payment {} on {} for account {}, balance now {}",
            record.payment_amount, record.payment_date, account_id, record.balance_after
        );

        self.publisher
            .publish(BalanceObservation::new(
                account_id,
                record.balance_after,
                record.payment_date,
                balance_notes::PAYMENT,
            ))
            .await;

        Ok(record)
    }

    fn list_payments(&self, account_id: &str) -> Result<Vec<PaymentRecord>> {
        self.payment_repository.list_by_account(account_id)
    }
}
