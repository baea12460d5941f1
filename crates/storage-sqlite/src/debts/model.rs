//! Database model for debt instruments.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use debtfolio_core::debts::{
    DebtInstrument, DebtKind, DebtTerms, MortgageDetails, PaymentFrequency, RateType,
};
use debtfolio_core::errors::{Error, Result};

use crate::errors::IntoCore;
use crate::utils::{format_date, parse_date, parse_decimal};

/// Database model for debt instruments
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::debt_instruments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DebtInstrumentDB {
    pub id: String,
    pub account_id: String,
    pub kind: String,
    pub original_amount: String,
    pub annual_rate: String,
    pub rate_type: String,
    pub start_date: String,
    pub term_periods: i32,
    pub amortization_periods: i32,
    pub payment_amount: String,
    pub payment_frequency: String,
    pub payment_day: Option<i32>,
    pub maturity_date: String,
    pub lender: Option<String>,
    pub description: Option<String>,
    /// JSON-encoded [`MortgageDetails`].
    pub mortgage_details: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl DebtInstrumentDB {
    pub fn new(account_id: &str, terms: DebtTerms) -> Result<Self> {
        let now = chrono::Utc::now().naive_utc();
        let mortgage_details = terms
            .mortgage_details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .into_core()?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            kind: terms.kind.as_str().to_string(),
            original_amount: terms.original_amount.to_string(),
            annual_rate: terms.annual_rate.to_string(),
            rate_type: terms.rate_type.as_str().to_string(),
            start_date: format_date(terms.start_date),
            term_periods: terms.term_periods,
            amortization_periods: terms.amortization_periods,
            payment_amount: terms.payment_amount.to_string(),
            payment_frequency: terms.payment_frequency.as_str().to_string(),
            payment_day: terms.payment_day,
            maturity_date: format_date(terms.maturity_date),
            lender: terms.lender,
            description: terms.description,
            mortgage_details,
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<DebtInstrumentDB> for DebtInstrument {
    type Error = Error;

    fn try_from(db: DebtInstrumentDB) -> Result<Self> {
        let kind = DebtKind::from_str(&db.kind).unwrap_or_else(|_| {
            warn!(
                "Unrecognized debt kind '{}' on instrument {}, treating it as a loan",
                db.kind, db.id
            );
            DebtKind::Loan
        });
        let rate_type = RateType::from_str(&db.rate_type)?;
        let mortgage_details = db
            .mortgage_details
            .as_deref()
            .map(serde_json::from_str::<MortgageDetails>)
            .transpose()
            .into_core()?;

        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            terms: DebtTerms {
                kind,
                original_amount: parse_decimal(&db.original_amount, "original_amount")?,
                annual_rate: parse_decimal(&db.annual_rate, "annual_rate")?,
                rate_type,
                start_date: parse_date(&db.start_date, "start_date")?,
                term_periods: db.term_periods,
                amortization_periods: db.amortization_periods,
                payment_amount: parse_decimal(&db.payment_amount, "payment_amount")?,
                payment_frequency: PaymentFrequency::from_stored(&db.payment_frequency),
                payment_day: db.payment_day,
                maturity_date: parse_date(&db.maturity_date, "maturity_date")?,
                lender: db.lender,
                description: db.description,
                mortgage_details,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
