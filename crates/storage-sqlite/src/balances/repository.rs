use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use debtfolio_core::balances::{BalanceEntry, BalanceLedgerTrait, BalanceObservation};
use debtfolio_core::errors::Result;

use super::model::BalanceEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::balance_history;
use crate::schema::balance_history::dsl;

/// Balance ledger stored in the `balance_history` table.
pub struct BalanceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BalanceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BalanceLedgerTrait for BalanceRepository {
    /// Upserts on `(account_id, balance_date)`: a later observation for the
    /// same day replaces the amount and notes but keeps the entry id.
    async fn append(&self, observation: BalanceObservation) -> Result<BalanceEntry> {
        let row = BalanceEntryDB::from(observation);

        self.writer
            .exec(move |conn| {
                diesel::insert_into(balance_history::table)
                    .values(&row)
                    .on_conflict((dsl::account_id, dsl::balance_date))
                    .do_update()
                    .set((
                        dsl::amount.eq(&row.amount),
                        dsl::notes.eq(&row.notes),
                        dsl::updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;

                dsl::balance_history
                    .filter(dsl::account_id.eq(&row.account_id))
                    .filter(dsl::balance_date.eq(&row.balance_date))
                    .select(BalanceEntryDB::as_select())
                    .first::<BalanceEntryDB>(conn)
                    .into_core()
                    .and_then(BalanceEntry::try_from)
            })
            .await
    }

    fn list_by_account(&self, account_id: &str) -> Result<Vec<BalanceEntry>> {
        let mut conn = get_connection(&self.pool)?;

        dsl::balance_history
            .filter(dsl::account_id.eq(account_id))
            .order(dsl::balance_date.desc())
            .select(BalanceEntryDB::as_select())
            .load::<BalanceEntryDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(BalanceEntry::try_from)
            .collect()
    }
}
