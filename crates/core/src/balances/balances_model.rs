//! Balance ledger domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::balance_notes;
use crate::debts::DebtInstrument;
use crate::payments::PaymentRecord;

/// A point-in-time balance to be recorded for an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceObservation {
    pub account_id: String,
    /// Signed balance; liabilities are negative.
    pub amount: Decimal,
    pub balance_date: NaiveDate,
    pub notes: String,
}

impl BalanceObservation {
    pub fn new(
        account_id: impl Into<String>,
        amount: Decimal,
        balance_date: NaiveDate,
        notes: &str,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            balance_date,
            notes: notes.to_string(),
        }
    }
}

/// An entry stored by the balance ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub id: String,
    pub account_id: String,
    pub balance_date: NaiveDate,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A publication the ledger rejected. Kept so an operator can resync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishFailure {
    pub observation: BalanceObservation,
    pub error: String,
    pub failed_at: NaiveDateTime,
}

/// Result of a resync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSyncOutcome {
    pub observation: BalanceObservation,
    /// False when the ledger rejected the write; the failure is logged.
    pub published: bool,
    /// Earlier failed observations for the account that were re-delivered.
    pub replayed: usize,
}

/// The debt's true outstanding balance.
///
/// The latest payment's running balance when one exists, otherwise the
/// full original amount as a liability dated at the start of the debt.
pub fn authoritative_balance(
    instrument: &DebtInstrument,
    latest_payment: Option<&PaymentRecord>,
) -> BalanceObservation {
    match latest_payment {
        Some(payment) => BalanceObservation::new(
            instrument.account_id.clone(),
            payment.balance_after,
            payment.payment_date,
            balance_notes::BALANCE_SYNC,
        ),
        None => BalanceObservation::new(
            instrument.account_id.clone(),
            -instrument.terms.original_amount,
            instrument.terms.start_date,
            balance_notes::BALANCE_SYNC,
        ),
    }
}
