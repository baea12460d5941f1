use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use debtfolio_core::debts::{DebtInstrument, DebtRepositoryTrait, DebtTerms};
use debtfolio_core::errors::{Error, Result};

use super::model::DebtInstrumentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::debt_instruments;
use crate::schema::debt_instruments::dsl;

/// Repository for debt instruments
pub struct DebtRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DebtRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DebtRepositoryTrait for DebtRepository {
    /// Inserts the instrument. The UNIQUE constraint on `account_id` turns a
    /// lost creation race into `Conflict`.
    async fn create(&self, account_id: &str, terms: DebtTerms) -> Result<DebtInstrument> {
        let row = DebtInstrumentDB::new(account_id, terms)?;

        self.writer
            .exec(move |conn| {
                diesel::insert_into(debt_instruments::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()
                    .map_err(|e| match e {
                        Error::Conflict(_) => Error::Conflict(format!(
                            "Account {} already has a debt instrument",
                            row.account_id
                        )),
                        other => other,
                    })?;
                DebtInstrument::try_from(row)
            })
            .await
    }

    fn find_by_account(&self, account_id: &str) -> Result<Option<DebtInstrument>> {
        let mut conn = get_connection(&self.pool)?;

        dsl::debt_instruments
            .filter(dsl::account_id.eq(account_id))
            .select(DebtInstrumentDB::as_select())
            .first::<DebtInstrumentDB>(&mut conn)
            .optional()
            .into_core()?
            .map(DebtInstrument::try_from)
            .transpose()
    }
}
