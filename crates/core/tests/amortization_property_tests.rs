//! Property-based tests for the amortization calculator.
//!
//! These tests check invariants that must hold for any terms in the ranges
//! creation accepts, using the `proptest` crate for random case generation.

use chrono::NaiveDate;
use debtfolio_core::constants::MAX_TERM_PERIODS;
use debtfolio_core::debts::{
    generate_schedule, summarize_schedule, total_payments, DebtKind, DebtTerms,
    NewDebtInstrument, PaymentFrequency, RateType,
};
use debtfolio_core::utils::money::round_money;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn arb_frequency() -> impl Strategy<Value = PaymentFrequency> {
    prop_oneof![
        Just(PaymentFrequency::Weekly),
        Just(PaymentFrequency::BiWeekly),
        Just(PaymentFrequency::SemiMonthly),
        Just(PaymentFrequency::Monthly),
    ]
}

/// Amounts in cents up to the largest accepted amount, weighted toward
/// everyday values so small payments against large balances come up often.
fn arb_cents() -> impl Strategy<Value = i64> {
    prop_oneof![
        1i64..100_000,
        100_000i64..100_000_000,
        100_000_000i64..=100_000_000_000_000,
    ]
}

fn arb_start_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

/// Raw terms over every range creation accepts, including payments that do
/// not cover interest.
fn arb_terms() -> impl Strategy<Value = DebtTerms> {
    (
        arb_cents(),    // original amount
        0i64..=10_000,  // annual rate, basis points
        arb_cents(),    // payment amount
        arb_frequency(),
        1i32..=MAX_TERM_PERIODS,
        arb_start_date(),
    )
        .prop_map(|(amount, rate_bps, payment, frequency, periods, start_date)| DebtTerms {
            kind: DebtKind::Loan,
            original_amount: Decimal::new(amount, 2),
            annual_rate: Decimal::new(rate_bps, 4),
            rate_type: RateType::Fixed,
            start_date,
            term_periods: periods,
            amortization_periods: periods,
            payment_amount: Decimal::new(payment, 2),
            payment_frequency: frequency,
            payment_day: None,
            maturity_date: start_date,
            lender: None,
            description: None,
            mortgage_details: None,
        })
}

/// Terms that made it through creation-time validation.
fn arb_accepted_terms() -> impl Strategy<Value = DebtTerms> {
    (
        arb_cents(),
        0i64..=10_000,
        arb_cents(),
        arb_frequency(),
        1i32..=MAX_TERM_PERIODS,
        arb_start_date(),
    )
        .prop_filter_map(
            "terms rejected at creation",
            |(amount, rate_bps, payment, frequency, periods, start_date)| {
                NewDebtInstrument {
                    kind: None,
                    original_amount: Decimal::new(amount, 2),
                    annual_rate: Decimal::new(rate_bps, 4),
                    rate_type: "fixed".to_string(),
                    start_date,
                    term_periods: periods,
                    amortization_periods: None,
                    payment_amount: Decimal::new(payment, 2),
                    payment_frequency: frequency.as_str().to_string(),
                    payment_day: None,
                    lender: None,
                    description: None,
                    mortgage_details: None,
                }
                .into_terms()
                .ok()
            },
        )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Repeated projections of the same terms are identical.
    #[test]
    fn prop_schedule_is_deterministic(terms in arb_terms()) {
        prop_assert_eq!(generate_schedule(&terms), generate_schedule(&terms));
    }

    /// The schedule never runs past the scheduled number of payments, and
    /// nothing follows an entry that pays the balance off.
    #[test]
    fn prop_schedule_terminates(terms in arb_terms()) {
        let entries = generate_schedule(&terms);
        prop_assert!(entries.len() as u32 <= total_payments(&terms));
        for entry in entries.iter().rev().skip(1) {
            prop_assert!(entry.balance_after > Decimal::new(1, 2));
        }
    }

    /// Every remaining balance is non-negative.
    #[test]
    fn prop_balances_are_non_negative(terms in arb_terms()) {
        for entry in generate_schedule(&terms) {
            prop_assert!(entry.balance_after >= Decimal::ZERO);
        }
    }

    /// Each payment is its principal plus its interest, interest is whole
    /// cents, and sequence numbers and due dates advance together.
    #[test]
    fn prop_entries_are_consistent(terms in arb_terms()) {
        let entries = generate_schedule(&terms);
        let mut previous_balance = terms.original_amount;
        for (index, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.sequence_number as usize, index + 1);
            prop_assert_eq!(entry.payment_amount, entry.principal_portion + entry.interest_portion);
            prop_assert_eq!(entry.interest_portion, round_money(entry.interest_portion));
            prop_assert!(entry.principal_portion <= previous_balance);
            previous_balance = entry.balance_after;
        }
        for pair in entries.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }

    /// Summary totals add up, and a payoff date is reported exactly when the
    /// schedule ends at zero.
    #[test]
    fn prop_summary_matches_entries(terms in arb_terms()) {
        let entries = generate_schedule(&terms);
        let summary = summarize_schedule(&terms, &entries);
        prop_assert_eq!(summary.number_of_payments as usize, entries.len());
        prop_assert_eq!(summary.total_paid, summary.total_principal + summary.total_interest);
        let ends_paid_off = entries
            .last()
            .map(|e| e.balance_after <= Decimal::new(1, 2))
            .unwrap_or(terms.original_amount <= Decimal::new(1, 2));
        prop_assert_eq!(summary.payoff_date.is_some(), ends_paid_off);
    }

    /// Anything creation accepts pays principal down every period.
    #[test]
    fn prop_accepted_terms_amortize(terms in arb_accepted_terms()) {
        let entries = generate_schedule(&terms);
        prop_assert_eq!(entries.is_empty(), terms.original_amount <= Decimal::new(1, 2));
        let mut previous_balance = terms.original_amount;
        for entry in &entries {
            prop_assert!(entry.principal_portion > Decimal::ZERO);
            prop_assert!(entry.balance_after < previous_balance);
            previous_balance = entry.balance_after;
        }
        prop_assert!(entries.len() as u32 <= total_payments(&terms));
    }
}
