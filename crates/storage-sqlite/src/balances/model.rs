//! Database model for balance history entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use debtfolio_core::balances::{BalanceEntry, BalanceObservation};
use debtfolio_core::errors::{Error, Result};

use crate::utils::{format_date, parse_date, parse_decimal};

/// Database model for balance history entries
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::balance_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceEntryDB {
    pub id: String,
    pub account_id: String,
    pub balance_date: String,
    pub amount: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BalanceObservation> for BalanceEntryDB {
    fn from(observation: BalanceObservation) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: observation.account_id,
            balance_date: format_date(observation.balance_date),
            amount: observation.amount.to_string(),
            notes: Some(observation.notes),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<BalanceEntryDB> for BalanceEntry {
    type Error = Error;

    fn try_from(db: BalanceEntryDB) -> Result<Self> {
        Ok(Self {
            balance_date: parse_date(&db.balance_date, "balance_date")?,
            amount: parse_decimal(&db.amount, "amount")?,
            id: db.id,
            account_id: db.account_id,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
