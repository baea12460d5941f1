use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use debtfolio_core::errors::{Error, Result};
use debtfolio_core::payments::{
    ensure_appends_in_order, next_balance, NewPaymentRecord, PaymentRecord,
    PaymentRepositoryTrait,
};

use super::model::PaymentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::debt_payments;
use crate::schema::debt_payments::dsl;

/// Repository for the payment ledger
pub struct PaymentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PaymentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Latest payment by `(payment_date desc, created_at desc)`.
fn latest_payment(conn: &mut SqliteConnection, account_id: &str) -> Result<Option<PaymentRecord>> {
    dsl::debt_payments
        .filter(dsl::account_id.eq(account_id))
        .order((dsl::payment_date.desc(), dsl::created_at.desc(), dsl::id.desc()))
        .select(PaymentDB::as_select())
        .first::<PaymentDB>(conn)
        .optional()
        .into_core()?
        .map(PaymentRecord::try_from)
        .transpose()
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    /// Reads the running balance and inserts the new payment in one writer
    /// job. Payments dated before the latest one are rejected. The writer runs jobs serially inside `IMMEDIATE` transactions, so
    /// no other payment can land between the read and the insert.
    async fn append_payment(
        &self,
        account_id: &str,
        new_payment: NewPaymentRecord,
        opening_balance: Decimal,
    ) -> Result<PaymentRecord> {
        let account_id = account_id.to_string();

        self.writer
            .exec(move |conn| {
                let latest = latest_payment(conn, &account_id)?;
                ensure_appends_in_order(latest.as_ref(), &new_payment)?;
                let current_balance = latest
                    .map(|p| p.balance_after)
                    .unwrap_or(opening_balance);
                let balance_after = next_balance(current_balance, &new_payment);
                let payment_date = new_payment.payment_date;

                let row = PaymentDB::new(&account_id, new_payment, balance_after);
                diesel::insert_into(debt_payments::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()
                    .map_err(|e| match e {
                        Error::Conflict(_) => Error::Conflict(format!(
                            "A payment on {} is already recorded for account {}",
                            payment_date, account_id
                        )),
                        other => other,
                    })?;
                debug!(
                    "Appended payment for account {}: {} -> {}",
                    account_id, current_balance, balance_after
                );

                PaymentRecord::try_from(row)
            })
            .await
    }

    fn get_latest(&self, account_id: &str) -> Result<Option<PaymentRecord>> {
        let mut conn = get_connection(&self.pool)?;
        latest_payment(&mut conn, account_id)
    }

    fn list_by_account(&self, account_id: &str) -> Result<Vec<PaymentRecord>> {
        let mut conn = get_connection(&self.pool)?;

        dsl::debt_payments
            .filter(dsl::account_id.eq(account_id))
            .order((dsl::payment_date.desc(), dsl::created_at.desc()))
            .select(PaymentDB::as_select())
            .load::<PaymentDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(PaymentRecord::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debts::DebtRepository;
    use crate::test_support::{create_test_account, setup_db};
    use chrono::NaiveDate;
    use debtfolio_core::debts::{DebtKind, DebtRepositoryTrait, DebtTerms, PaymentFrequency, RateType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(payment_date: NaiveDate, principal: Decimal) -> NewPaymentRecord {
        NewPaymentRecord {
            payment_date,
            payment_amount: principal + dec!(416.67),
            principal_portion: principal,
            interest_portion: dec!(416.67),
            extra_principal: Decimal::ZERO,
            notes: Some("scheduled".to_string()),
        }
    }

    #[tokio::test]
    async fn test_balances_chain_across_payments() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        let first = repo
            .append_payment("acc-1", payment(date(2024, 2, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap();
        assert_eq!(first.balance_after, dec!(-99500));

        // The opening balance is only used for the first payment.
        let second = repo
            .append_payment("acc-1", payment(date(2024, 3, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap();
        assert_eq!(second.balance_after, dec!(-99000));

        let latest = repo.get_latest("acc-1").unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.notes.as_deref(), Some("scheduled"));
    }

    #[tokio::test]
    async fn test_duplicate_date_conflicts_and_leaves_ledger_unchanged() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        repo.append_payment("acc-1", payment(date(2024, 2, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap();
        let err = repo
            .append_payment("acc-1", payment(date(2024, 2, 1), dec!(900)), dec!(-100000))
            .await
            .unwrap_err();
        assert!(err.is_conflict(), "expected conflict, got {:?}", err);

        let payments = repo.list_by_account("acc-1").unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].balance_after, dec!(-99500));
    }

    #[tokio::test]
    async fn test_same_date_on_different_accounts_is_allowed() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        create_test_account(&db.pool, "acc-2");
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        repo.append_payment("acc-1", payment(date(2024, 2, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap();
        let other = repo
            .append_payment("acc-2", payment(date(2024, 2, 1), dec!(500)), dec!(-20000))
            .await
            .unwrap();
        assert_eq!(other.balance_after, dec!(-19500));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_empty_for_unknown_account() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        for month in [1, 2, 3] {
            repo.append_payment("acc-1", payment(date(2024, month, 1), dec!(100)), dec!(-1000))
                .await
                .unwrap();
        }

        let dates: Vec<NaiveDate> = repo
            .list_by_account("acc-1")
            .unwrap()
            .into_iter()
            .map(|p| p.payment_date)
            .collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 2, 1), date(2024, 1, 1)]);
        assert!(repo.list_by_account("nobody").unwrap().is_empty());
        assert!(repo.get_latest("nobody").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_backdated_payment_is_rejected() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        repo.append_payment("acc-1", payment(date(2024, 3, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap();
        let err = repo
            .append_payment("acc-1", payment(date(2024, 1, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "expected validation, got {:?}", err);
        assert_eq!(repo.list_by_account("acc-1").unwrap().len(), 1);

        let next = repo
            .append_payment("acc-1", payment(date(2024, 4, 1), dec!(500)), dec!(-100000))
            .await
            .unwrap();
        assert_eq!(next.balance_after, dec!(-99000));
        assert_eq!(repo.list_by_account("acc-1").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_overpayment_stops_at_zero() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        let record = repo
            .append_payment("acc-1", payment(date(2024, 2, 1), dec!(1500)), dec!(-1000))
            .await
            .unwrap();
        assert_eq!(record.balance_after, Decimal::ZERO);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_payments_for_one_date_record_once() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let repo = Arc::new(PaymentRepository::new(db.pool.clone(), db.writer.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.append_payment("acc-1", payment(date(2024, 5, 1), dec!(100)), dec!(-10000))
                    .await
            }));
        }

        let mut recorded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(record) => {
                    recorded += 1;
                    assert_eq!(record.balance_after, dec!(-9900));
                }
                Err(e) => assert!(e.is_conflict(), "expected conflict, got {:?}", e),
            }
        }
        assert_eq!(recorded, 1);
        assert_eq!(repo.list_by_account("acc-1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_payments_require_existing_account() {
        let db = setup_db();
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        let err = repo
            .append_payment("ghost", payment(date(2024, 2, 1), dec!(500)), dec!(-1000))
            .await
            .unwrap_err();
        assert!(!err.is_conflict());
        assert!(repo.list_by_account("ghost").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payments_follow_instrument_balance() {
        let db = setup_db();
        create_test_account(&db.pool, "acc-1");
        let debts = DebtRepository::new(db.pool.clone(), db.writer.clone());
        let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());

        let instrument = debts
            .create(
                "acc-1",
                DebtTerms {
                    kind: DebtKind::Loan,
                    original_amount: dec!(100000),
                    annual_rate: dec!(0.05),
                    rate_type: RateType::Fixed,
                    start_date: date(2024, 1, 1),
                    term_periods: 360,
                    amortization_periods: 360,
                    payment_amount: dec!(536.82),
                    payment_frequency: PaymentFrequency::Monthly,
                    payment_day: Some(1),
                    maturity_date: date(2054, 1, 1),
                    lender: None,
                    description: None,
                    mortgage_details: None,
                },
            )
            .await
            .unwrap();

        let record = repo
            .append_payment(
                "acc-1",
                payment(date(2024, 2, 1), dec!(120.15)),
                -instrument.terms.original_amount,
            )
            .await
            .unwrap();
        assert_eq!(record.balance_after, dec!(-99879.85));
    }
}
