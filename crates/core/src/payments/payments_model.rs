//! Payment domain models.

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A recorded payment and the balance it left behind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub account_id: String,
    pub payment_date: NaiveDate,
    pub payment_amount: Decimal,
    pub principal_portion: Decimal,
    pub interest_portion: Decimal,
    pub extra_principal: Decimal,
    /// Signed outstanding balance after this payment; a liability is
    /// negative and moves toward zero.
    pub balance_after: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentRecord {
    pub payment_date: NaiveDate,
    pub payment_amount: Decimal,
    pub principal_portion: Decimal,
    pub interest_portion: Decimal,
    #[serde(default)]
    pub extra_principal: Decimal,
    pub notes: Option<String>,
}

impl NewPaymentRecord {
    pub fn validate(&self) -> Result<()> {
        if self.payment_amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Payment amount must be positive"));
        }
        if self.principal_portion < Decimal::ZERO {
            return Err(Error::invalid_input("Principal portion cannot be negative"));
        }
        if self.interest_portion < Decimal::ZERO {
            return Err(Error::invalid_input("Interest portion cannot be negative"));
        }
        if self.extra_principal < Decimal::ZERO {
            return Err(Error::invalid_input("Extra principal cannot be negative"));
        }
        Ok(())
    }

    /// Principal this payment removes from the balance.
    pub fn principal_reduction(&self) -> Decimal {
        self.principal_portion + self.extra_principal
    }
}

/// Balance after applying `payment` to `current_balance`.
///
/// Principal and extra principal move the negative liability toward zero.
/// An overpayment stops at zero; a liability never turns into an asset.
pub fn next_balance(current_balance: Decimal, payment: &NewPaymentRecord) -> Decimal {
    let balance = current_balance + payment.principal_reduction();
    if balance > Decimal::ZERO {
        warn!(
            "Payment on {} overpays the outstanding balance {} by {}; recording a zero balance",
            payment.payment_date, current_balance, balance
        );
        return Decimal::ZERO;
    }
    balance
}

/// Rejects a payment dated before the latest recorded one.
///
/// Balances chain in date order, so a back-dated record would be computed
/// from a later balance and break that chain. A payment on the same date as
/// the latest one is left to the ledger's uniqueness rule.
pub fn ensure_appends_in_order(
    latest: Option<&PaymentRecord>,
    payment: &NewPaymentRecord,
) -> Result<()> {
    match latest {
        Some(latest) if payment.payment_date < latest.payment_date => {
            Err(Error::invalid_input(format!(
                "Payment on {} predates the latest recorded payment on {}",
                payment.payment_date, latest.payment_date
            )))
        }
        _ => Ok(()),
    }
}
