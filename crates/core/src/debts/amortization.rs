//! Amortization schedule generation.
//!
//! The schedule is a pure function of [`DebtTerms`]: it is produced by a
//! finite iterator that never touches storage and never mutates the terms.

use std::iter::FusedIterator;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::debts_model::{
    AmortizationScheduleEntry, AmortizationSummary, DebtTerms, PaymentFrequency,
};
use crate::constants::PAID_OFF_EPSILON;
use crate::utils::money::round_money;

/// Number of scheduled payments: `ceil(amortization_periods / (12 / periods_per_year))`.
pub fn total_payments(terms: &DebtTerms) -> u32 {
    if terms.amortization_periods <= 0 {
        return 0;
    }
    let periods_per_year = Decimal::from(terms.payment_frequency.periods_per_year());
    let payments = (Decimal::from(terms.amortization_periods) * periods_per_year
        / Decimal::from(12))
    .ceil();
    payments.to_u32().unwrap_or(u32::MAX)
}

/// Iterator over the projected payments of a debt instrument.
///
/// Ends when the balance drops to [`PAID_OFF_EPSILON`] or below, when the
/// scheduled number of payments is exhausted, or as soon as a payment would
/// not reduce the balance.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    period_rate: Decimal,
    payment_amount: Decimal,
    total_payments: u32,
    frequency: PaymentFrequency,
    balance: Decimal,
    due_date: Option<NaiveDate>,
    sequence_number: u32,
}

impl AmortizationSchedule {
    pub fn new(terms: &DebtTerms) -> Self {
        let periods_per_year = Decimal::from(terms.payment_frequency.periods_per_year());
        Self {
            period_rate: terms.annual_rate / periods_per_year,
            payment_amount: terms.payment_amount,
            total_payments: total_payments(terms),
            frequency: terms.payment_frequency,
            balance: terms.original_amount,
            due_date: Some(terms.start_date),
            sequence_number: 0,
        }
    }
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationScheduleEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sequence_number >= self.total_payments || self.balance <= PAID_OFF_EPSILON {
            return None;
        }
        let due_date = self.due_date?;

        let interest = self.balance.checked_mul(self.period_rate).map(round_money);
        let principal = interest.and_then(|i| self.payment_amount.checked_sub(i));
        let (interest, mut principal) = match (interest, principal) {
            (Some(interest), Some(principal)) if principal > Decimal::ZERO => (interest, principal),
            _ => {
                // Payment no longer covers interest: the balance would only grow.
                warn!(
                    "Payment {} does not amortize a balance of {}, ending schedule after {} payments",
                    self.payment_amount, self.balance, self.sequence_number
                );
                self.due_date = None;
                return None;
            }
        };
        self.sequence_number += 1;

        // Final payment: never take more principal than is owed. The reduced
        // payment amount carries over to any remaining iterations.
        if principal > self.balance {
            principal = self.balance;
            self.payment_amount = principal + interest;
        }

        self.balance = (self.balance - principal).max(Decimal::ZERO);
        self.due_date = self.frequency.next_due_date(due_date);

        Some(AmortizationScheduleEntry {
            sequence_number: self.sequence_number,
            due_date,
            payment_amount: self.payment_amount,
            principal_portion: principal,
            interest_portion: interest,
            balance_after: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_payments.saturating_sub(self.sequence_number) as usize;
        if self.balance <= PAID_OFF_EPSILON || self.due_date.is_none() {
            (0, Some(0))
        } else {
            (0, Some(remaining))
        }
    }
}

impl FusedIterator for AmortizationSchedule {}

/// Collects the full schedule for `terms`.
pub fn generate_schedule(terms: &DebtTerms) -> Vec<AmortizationScheduleEntry> {
    AmortizationSchedule::new(terms).collect()
}

/// Totals a schedule produced from `terms`.
pub fn summarize_schedule(
    terms: &DebtTerms,
    entries: &[AmortizationScheduleEntry],
) -> AmortizationSummary {
    let total_paid: Decimal = entries.iter().map(|e| e.payment_amount).sum();
    let total_principal: Decimal = entries.iter().map(|e| e.principal_portion).sum();
    let total_interest: Decimal = entries.iter().map(|e| e.interest_portion).sum();
    let residual_balance = entries
        .last()
        .map(|e| e.balance_after)
        .unwrap_or(terms.original_amount);

    let payoff_date = (residual_balance <= PAID_OFF_EPSILON).then(|| {
        entries
            .last()
            .map(|e| e.due_date)
            .unwrap_or(terms.start_date)
    });

    if payoff_date.is_none() {
        warn!(
            "Schedule ends after {} payments with {} still outstanding",
            entries.len(),
            residual_balance
        );
    }

    AmortizationSummary {
        number_of_payments: entries.len() as u32,
        total_paid,
        total_principal,
        total_interest,
        payoff_date,
        residual_balance: if payoff_date.is_some() {
            Decimal::ZERO
        } else {
            residual_balance
        },
    }
}
