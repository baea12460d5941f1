//! Debt instrument repository and service traits.

use async_trait::async_trait;

use super::debts_model::{
    AmortizationScheduleResponse, DebtInstrument, DebtTerms, NewDebtInstrument,
};
use crate::errors::Result;

/// Trait defining the contract for debt instrument storage.
#[async_trait]
pub trait DebtRepositoryTrait: Send + Sync {
    /// Persists the terms as the account's debt instrument.
    ///
    /// At most one instrument exists per account; a second insert fails
    /// with `Conflict` even when two creations race.
    async fn create(&self, account_id: &str, terms: DebtTerms) -> Result<DebtInstrument>;

    fn find_by_account(&self, account_id: &str) -> Result<Option<DebtInstrument>>;
}

/// Trait defining the Debt Terms Store and calculator operations.
#[async_trait]
pub trait DebtServiceTrait: Send + Sync {
    async fn create_debt_instrument(
        &self,
        account_id: &str,
        new_instrument: NewDebtInstrument,
    ) -> Result<DebtInstrument>;

    /// Fails with `NotFound` when the account has no instrument.
    fn get_debt_instrument(&self, account_id: &str) -> Result<DebtInstrument>;

    /// Projects the instrument's payment schedule. Nothing is persisted.
    fn get_amortization_schedule(&self, account_id: &str) -> Result<AmortizationScheduleResponse>;
}
