//! Database model for debt payments.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use debtfolio_core::errors::{Error, Result};
use debtfolio_core::payments::{NewPaymentRecord, PaymentRecord};

use crate::utils::{format_date, parse_date, parse_decimal};

/// Database model for debt payments
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::debt_payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentDB {
    pub id: String,
    pub account_id: String,
    pub payment_date: String,
    pub payment_amount: String,
    pub principal_portion: String,
    pub interest_portion: String,
    pub extra_principal: String,
    pub balance_after: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PaymentDB {
    pub fn new(account_id: &str, payment: NewPaymentRecord, balance_after: Decimal) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            account_id: account_id.to_string(),
            payment_date: format_date(payment.payment_date),
            payment_amount: payment.payment_amount.to_string(),
            principal_portion: payment.principal_portion.to_string(),
            interest_portion: payment.interest_portion.to_string(),
            extra_principal: payment.extra_principal.to_string(),
            balance_after: balance_after.to_string(),
            notes: payment.notes.filter(|n| !n.trim().is_empty()),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<PaymentDB> for PaymentRecord {
    type Error = Error;

    fn try_from(db: PaymentDB) -> Result<Self> {
        Ok(Self {
            payment_date: parse_date(&db.payment_date, "payment_date")?,
            payment_amount: parse_decimal(&db.payment_amount, "payment_amount")?,
            principal_portion: parse_decimal(&db.principal_portion, "principal_portion")?,
            interest_portion: parse_decimal(&db.interest_portion, "interest_portion")?,
            extra_principal: parse_decimal(&db.extra_principal, "extra_principal")?,
            balance_after: parse_decimal(&db.balance_after, "balance_after")?,
            id: db.id,
            account_id: db.account_id,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}
