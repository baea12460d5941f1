//! Tests for the amortization calculator.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::debts::{
        generate_schedule, summarize_schedule, total_payments, AmortizationSchedule, DebtKind,
        DebtTerms, PaymentFrequency, RateType,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(
        amount: Decimal,
        rate: Decimal,
        payment: Decimal,
        frequency: PaymentFrequency,
        amortization_periods: i32,
    ) -> DebtTerms {
        DebtTerms {
            kind: DebtKind::Loan,
            original_amount: amount,
            annual_rate: rate,
            rate_type: RateType::Fixed,
            start_date: date(2024, 1, 15),
            term_periods: amortization_periods,
            amortization_periods,
            payment_amount: payment,
            payment_frequency: frequency,
            payment_day: None,
            maturity_date: date(2025, 1, 15),
            lender: None,
            description: None,
            mortgage_details: None,
        }
    }

    #[test]
    fn test_total_payments_per_frequency() {
        let monthly = terms(dec!(1000), dec!(0), dec!(10), PaymentFrequency::Monthly, 12);
        let weekly = terms(dec!(1000), dec!(0), dec!(10), PaymentFrequency::Weekly, 12);
        let bi_weekly = terms(dec!(1000), dec!(0), dec!(10), PaymentFrequency::BiWeekly, 12);
        let semi_monthly = terms(dec!(1000), dec!(0), dec!(10), PaymentFrequency::SemiMonthly, 12);

        assert_eq!(total_payments(&monthly), 12);
        assert_eq!(total_payments(&weekly), 52);
        assert_eq!(total_payments(&bi_weekly), 26);
        assert_eq!(total_payments(&semi_monthly), 24);
    }

    #[test]
    fn test_total_payments_rounds_up() {
        // 52 / 12 = 4.33 weekly payments per month
        let weekly = terms(dec!(1000), dec!(0), dec!(10), PaymentFrequency::Weekly, 1);
        assert_eq!(total_payments(&weekly), 5);
    }

    #[test]
    fn test_first_entry_splits_interest_and_principal() {
        let entries = generate_schedule(&terms(
            dec!(12000),
            dec!(0.12),
            dec!(1000),
            PaymentFrequency::Monthly,
            12,
        ));

        let first = &entries[0];
        assert_eq!(first.sequence_number, 1);
        assert_eq!(first.due_date, date(2024, 1, 15));
        assert_eq!(first.payment_amount, dec!(1000));
        assert_eq!(first.interest_portion, dec!(120.00));
        assert_eq!(first.principal_portion, dec!(880.00));
        assert_eq!(first.balance_after, dec!(11120.00));
    }

    #[test]
    fn test_under_amortizing_schedule_stops_at_total_payments() {
        let terms = terms(
            dec!(12000),
            dec!(0.12),
            dec!(1000),
            PaymentFrequency::Monthly,
            12,
        );
        let entries = generate_schedule(&terms);

        assert_eq!(entries.len(), 12);
        let last = entries.last().unwrap();
        assert_eq!(last.due_date, date(2024, 12, 15));
        assert_eq!(last.principal_portion, dec!(981.79));
        assert_eq!(last.interest_portion, dec!(18.21));
        assert_eq!(last.balance_after, dec!(839.40));

        let summary = summarize_schedule(&terms, &entries);
        assert_eq!(summary.number_of_payments, 12);
        assert_eq!(summary.payoff_date, None);
        assert_eq!(summary.residual_balance, dec!(839.40));
        assert_eq!(summary.total_paid, dec!(12000));
        assert_eq!(summary.total_principal, dec!(11160.60));
        assert_eq!(summary.total_interest, dec!(839.40));
    }

    #[test]
    fn test_fully_amortizing_schedule_reaches_zero() {
        let entries = generate_schedule(&terms(
            dec!(12000),
            dec!(0.12),
            dec!(1066.19),
            PaymentFrequency::Monthly,
            12,
        ));

        assert_eq!(entries.len(), 12);
        let last = entries.last().unwrap();
        assert_eq!(last.payment_amount, dec!(1066.14));
        assert_eq!(last.principal_portion, dec!(1055.58));
        assert_eq!(last.interest_portion, dec!(10.56));
        assert_eq!(last.balance_after, Decimal::ZERO);
    }

    #[test]
    fn test_final_payment_correction_clamps_principal() {
        let terms = terms(
            dec!(12000),
            dec!(0.12),
            dec!(1100),
            PaymentFrequency::Monthly,
            12,
        );
        let entries = generate_schedule(&terms);

        assert_eq!(entries.len(), 12);
        assert_eq!(entries[10].payment_amount, dec!(1100));
        assert_eq!(entries[10].balance_after, dec!(664.51));

        let last = &entries[11];
        assert_eq!(last.principal_portion, dec!(664.51));
        assert_eq!(last.interest_portion, dec!(6.65));
        assert_eq!(
            last.payment_amount,
            last.principal_portion + last.interest_portion
        );
        assert_eq!(last.payment_amount, dec!(671.16));
        assert_eq!(last.balance_after, Decimal::ZERO);

        let summary = summarize_schedule(&terms, &entries);
        assert_eq!(summary.payoff_date, Some(date(2024, 12, 15)));
        assert_eq!(summary.residual_balance, Decimal::ZERO);
        assert_eq!(summary.total_principal, dec!(12000));
        assert_eq!(summary.total_interest, dec!(771.16));
        assert_eq!(summary.total_paid, dec!(12771.16));
    }

    #[test]
    fn test_early_payoff_ends_schedule() {
        let terms = terms(dec!(1000), dec!(0), dec!(300), PaymentFrequency::Monthly, 12);
        let entries = generate_schedule(&terms);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].balance_after, dec!(100));
        assert_eq!(entries[3].payment_amount, dec!(100));
        assert_eq!(entries[3].principal_portion, dec!(100));
        assert_eq!(entries[3].interest_portion, Decimal::ZERO);
        assert_eq!(entries[3].balance_after, Decimal::ZERO);
        assert_eq!(
            summarize_schedule(&terms, &entries).payoff_date,
            Some(date(2024, 4, 15))
        );
    }

    #[test]
    fn test_interest_is_rounded_to_cents() {
        let entries = generate_schedule(&terms(
            dec!(100000),
            dec!(0.05),
            dec!(1000),
            PaymentFrequency::Monthly,
            300,
        ));
        assert_eq!(entries[0].interest_portion, dec!(416.67));
        assert_eq!(entries[0].principal_portion, dec!(583.33));
        assert_eq!(entries.len(), 130);
        assert_eq!(entries[129].payment_amount, dec!(628.92));
    }

    #[test]
    fn test_due_dates_follow_frequency() {
        let start = date(2024, 1, 15);
        let cases = [
            (PaymentFrequency::Weekly, date(2024, 1, 22)),
            (PaymentFrequency::BiWeekly, date(2024, 1, 29)),
            (PaymentFrequency::SemiMonthly, date(2024, 1, 30)),
            (PaymentFrequency::Monthly, date(2024, 2, 15)),
        ];
        for (frequency, second_due) in cases {
            let entries = generate_schedule(&terms(dec!(1000), dec!(0), dec!(10), frequency, 12));
            assert_eq!(entries[0].due_date, start, "{}", frequency);
            assert_eq!(entries[1].due_date, second_due, "{}", frequency);
        }
    }

    #[test]
    fn test_monthly_due_dates_clamp_to_month_end() {
        let mut terms = terms(dec!(1000), dec!(0), dec!(100), PaymentFrequency::Monthly, 12);
        terms.start_date = date(2024, 1, 31);
        let entries = generate_schedule(&terms);
        assert_eq!(entries[1].due_date, date(2024, 2, 29));
        // Each step adds one month to the previous due date.
        assert_eq!(entries[2].due_date, date(2024, 3, 29));
    }

    #[test]
    fn test_schedule_leaves_terms_untouched() {
        let terms = terms(
            dec!(12000),
            dec!(0.12),
            dec!(1100),
            PaymentFrequency::Monthly,
            12,
        );
        let before = terms.clone();
        let first = generate_schedule(&terms);
        let second = generate_schedule(&terms);
        assert_eq!(terms, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_iterator_is_fused_and_tracks_balance() {
        let terms = terms(dec!(1000), dec!(0), dec!(600), PaymentFrequency::Monthly, 12);
        let mut schedule = AmortizationSchedule::new(&terms);
        assert_eq!(schedule.next().map(|e| e.balance_after), Some(dec!(400)));
        let last = schedule.next().unwrap();
        assert_eq!(last.principal_portion, dec!(400));
        assert_eq!(last.balance_after, Decimal::ZERO);
        assert!(schedule.next().is_none());
        assert!(schedule.next().is_none());
        assert_eq!(schedule.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_summary_of_empty_schedule() {
        let terms = terms(dec!(1000), dec!(0), dec!(10), PaymentFrequency::Monthly, 12);
        let summary = summarize_schedule(&terms, &[]);
        assert_eq!(summary.number_of_payments, 0);
        assert_eq!(summary.total_paid, Decimal::ZERO);
        assert_eq!(summary.payoff_date, None);
        assert_eq!(summary.residual_balance, dec!(1000));
    }

    #[test]
    fn test_payment_below_interest_ends_schedule_without_entries() {
        // 100000 at 100% a year accrues 8333.33 a month against a 0.01 payment.
        let terms = terms(
            dec!(100000),
            dec!(1),
            dec!(0.01),
            PaymentFrequency::Monthly,
            1200,
        );
        let entries = generate_schedule(&terms);
        assert!(entries.is_empty());

        let summary = summarize_schedule(&terms, &entries);
        assert_eq!(summary.payoff_date, None);
        assert_eq!(summary.residual_balance, dec!(100000));
    }

    #[test]
    fn test_payment_equal_to_interest_does_not_amortize() {
        let terms = terms(
            dec!(12000),
            dec!(0.12),
            dec!(120),
            PaymentFrequency::Monthly,
            12,
        );
        assert!(generate_schedule(&terms).is_empty());
    }

    #[test]
    fn test_longest_weekly_schedule_stays_bounded() {
        let terms = terms(
            dec!(1000000000000),
            dec!(1),
            dec!(1000000000000),
            PaymentFrequency::Weekly,
            1200,
        );
        assert_eq!(total_payments(&terms), 5200);
        let entries = generate_schedule(&terms);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].interest_portion, dec!(19230769230.77));
        assert_eq!(entries[1].balance_after, Decimal::ZERO);
        for entry in &entries {
            assert_eq!(
                entry.payment_amount,
                entry.principal_portion + entry.interest_portion
            );
        }
    }

    #[test]
    fn test_slow_amortization_runs_the_full_term() {
        // Barely above the 83.33 first interest; the residual stays large.
        let terms = terms(
            dec!(100000),
            dec!(0.01),
            dec!(83.34),
            PaymentFrequency::Monthly,
            1200,
        );
        let entries = generate_schedule(&terms);
        assert_eq!(entries.len(), 1200);
        for pair in entries.windows(2) {
            assert!(pair[1].balance_after < pair[0].balance_after);
        }
    }
}
