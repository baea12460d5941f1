//! Payment repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::payments_model::{NewPaymentRecord, PaymentRecord};
use crate::errors::Result;

/// Trait defining the contract for the payment ledger's storage.
#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    /// Appends a payment and computes its running balance.
    ///
    /// Reading the latest balance and inserting the new record must happen
    /// as one serialized unit per account, so two concurrent payments can
    /// never chain from the same predecessor. `opening_balance` is used
    /// when the account has no payment yet. Fails with `Conflict` when a
    /// payment already exists for the account and date.
    async fn append_payment(
        &self,
        account_id: &str,
        new_payment: NewPaymentRecord,
        opening_balance: Decimal,
    ) -> Result<PaymentRecord>;

    /// The most recent payment by `(payment_date desc, creation order desc)`.
    fn get_latest(&self, account_id: &str) -> Result<Option<PaymentRecord>>;

    /// All payments for an account, newest payment date first.
    fn list_by_account(&self, account_id: &str) -> Result<Vec<PaymentRecord>>;
}

/// Trait defining the Payment Ledger operations.
#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    /// Records a payment against the account's debt instrument and
    /// publishes the resulting balance.
    async fn record_payment(
        &self,
        account_id: &str,
        new_payment: NewPaymentRecord,
    ) -> Result<PaymentRecord>;

    /// Payments for an account, newest first. Empty when there are none.
    fn list_payments(&self, account_id: &str) -> Result<Vec<PaymentRecord>>;
}
