//! Debt instrument domain models.
//!
//! A debt instrument is either a loan or a mortgage. Both share one set of
//! terms; a mortgage may additionally carry [`MortgageDetails`], which the
//! engine treats as opaque metadata.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MONEY_AMOUNT, MAX_TERM_PERIODS};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::money::round_money;
use crate::utils::time_utils::add_months;

/// Normalizes an enum wire value: lowercase, `_` and spaces become `-`.
fn normalize_enum_value(value: &str) -> String {
    value.trim().to_lowercase().replace(['_', ' '], "-")
}

/// Whether the instrument's rate is fixed for the term or floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    Fixed,
    Variable,
}

impl RateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Fixed => "fixed",
            RateType::Variable => "variable",
        }
    }
}

impl FromStr for RateType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match normalize_enum_value(value).as_str() {
            "fixed" => Ok(RateType::Fixed),
            "variable" => Ok(RateType::Variable),
            _ => Err(Error::Validation(ValidationError::UnrecognizedValue {
                field: "rateType",
                value: value.to_string(),
            })),
        }
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often scheduled payments fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
}

impl PaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::BiWeekly => "bi-weekly",
            PaymentFrequency::SemiMonthly => "semi-monthly",
            PaymentFrequency::Monthly => "monthly",
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::SemiMonthly => 24,
            PaymentFrequency::Monthly => 12,
        }
    }

    /// Returns the due date following `date`.
    ///
    /// Semi-monthly is approximated as a fixed 15-day step. Returns `None`
    /// only when the calendar overflows.
    pub fn next_due_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            PaymentFrequency::Weekly => date.checked_add_signed(Duration::days(7)),
            PaymentFrequency::BiWeekly => date.checked_add_signed(Duration::days(14)),
            PaymentFrequency::SemiMonthly => date.checked_add_signed(Duration::days(15)),
            PaymentFrequency::Monthly => add_months(date, 1),
        }
    }

    /// Reads a frequency persisted by an earlier version of the schema.
    ///
    /// Unrecognized values fall back to monthly. Input from callers goes
    /// through [`FromStr`] instead, which rejects them.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!(
                "Unrecognized payment frequency '{}' in storage, treating it as monthly",
                value
            );
            PaymentFrequency::Monthly
        })
    }
}

impl FromStr for PaymentFrequency {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match normalize_enum_value(value).as_str() {
            "weekly" => Ok(PaymentFrequency::Weekly),
            "bi-weekly" | "biweekly" => Ok(PaymentFrequency::BiWeekly),
            "semi-monthly" | "semimonthly" => Ok(PaymentFrequency::SemiMonthly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            _ => Err(Error::Validation(ValidationError::UnrecognizedValue {
                field: "paymentFrequency",
                value: value.to_string(),
            })),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan or mortgage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    #[default]
    Loan,
    Mortgage,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::Loan => "loan",
            DebtKind::Mortgage => "mortgage",
        }
    }
}

impl FromStr for DebtKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match normalize_enum_value(value).as_str() {
            "loan" => Ok(DebtKind::Loan),
            "mortgage" => Ok(DebtKind::Mortgage),
            _ => Err(Error::Validation(ValidationError::UnrecognizedValue {
                field: "kind",
                value: value.to_string(),
            })),
        }
    }
}

/// Property attributes carried by a mortgage. Opaque to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MortgageDetails {
    pub property_address: Option<String>,
    pub property_type: Option<String>,
    pub property_value: Option<Decimal>,
    /// End of the current term, when the mortgage renews.
    pub renewal_date: Option<NaiveDate>,
}

/// Validated terms of a debt instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtTerms {
    pub kind: DebtKind,
    pub original_amount: Decimal,
    /// Decimal fraction, e.g. `0.0525` for 5.25%.
    pub annual_rate: Decimal,
    pub rate_type: RateType,
    pub start_date: NaiveDate,
    /// Contract length in months.
    pub term_periods: i32,
    /// Months over which principal is scheduled to reach zero.
    pub amortization_periods: i32,
    pub payment_amount: Decimal,
    pub payment_frequency: PaymentFrequency,
    pub payment_day: Option<i32>,
    /// `start_date + term_periods` months. Set once at creation.
    pub maturity_date: NaiveDate,
    pub lender: Option<String>,
    pub description: Option<String>,
    pub mortgage_details: Option<MortgageDetails>,
}

/// Domain model representing a persisted debt instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtInstrument {
    pub id: String,
    pub account_id: String,
    #[serde(flatten)]
    pub terms: DebtTerms,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a debt instrument.
///
/// Enumerations arrive as raw strings so that unrecognized values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDebtInstrument {
    pub kind: Option<String>,
    pub original_amount: Decimal,
    pub annual_rate: Decimal,
    pub rate_type: String,
    pub start_date: NaiveDate,
    pub term_periods: i32,
    /// Defaults to `term_periods` when absent.
    pub amortization_periods: Option<i32>,
    pub payment_amount: Decimal,
    pub payment_frequency: String,
    pub payment_day: Option<i32>,
    pub lender: Option<String>,
    pub description: Option<String>,
    pub mortgage_details: Option<MortgageDetails>,
}

impl NewDebtInstrument {
    /// Validates the input and derives the maturity date.
    pub fn into_terms(self) -> Result<DebtTerms> {
        let kind = match self.kind.as_deref() {
            Some(kind) => kind.parse::<DebtKind>()?,
            None if self.mortgage_details.is_some() => DebtKind::Mortgage,
            None => DebtKind::Loan,
        };
        let rate_type = self.rate_type.parse::<RateType>()?;
        let payment_frequency = self.payment_frequency.parse::<PaymentFrequency>()?;

        if self.original_amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Original amount must be positive"));
        }
        if self.payment_amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Payment amount must be positive"));
        }
        if self.annual_rate < Decimal::ZERO || self.annual_rate > Decimal::ONE {
            return Err(Error::invalid_input(
                "Annual rate must be a fraction between 0 and 1",
            ));
        }
        if self.original_amount > MAX_MONEY_AMOUNT || self.payment_amount > MAX_MONEY_AMOUNT {
            return Err(Error::invalid_input(format!(
                "Amounts may not exceed {}",
                MAX_MONEY_AMOUNT
            )));
        }
        if self.term_periods <= 0 {
            return Err(Error::invalid_input("Term periods must be positive"));
        }
        if self.term_periods > MAX_TERM_PERIODS {
            return Err(Error::invalid_input(format!(
                "Term periods may not exceed {} months",
                MAX_TERM_PERIODS
            )));
        }

        let amortization_periods = self.amortization_periods.unwrap_or(self.term_periods);
        if amortization_periods <= 0 {
            return Err(Error::invalid_input("Amortization periods must be positive"));
        }
        if amortization_periods > MAX_TERM_PERIODS {
            return Err(Error::invalid_input(format!(
                "Amortization periods may not exceed {} months",
                MAX_TERM_PERIODS
            )));
        }
        if kind == DebtKind::Loan && amortization_periods != self.term_periods {
            return Err(Error::invalid_input(
                "A loan amortizes over its full term; amortization periods must equal term periods",
            ));
        }
        if kind == DebtKind::Loan && self.mortgage_details.is_some() {
            return Err(Error::invalid_input(
                "Mortgage details are only accepted for mortgages",
            ));
        }
        if let Some(day) = self.payment_day {
            if !(1..=31).contains(&day) {
                return Err(Error::invalid_input("Payment day must be between 1 and 31"));
            }
        }

        // Interest shrinks with the balance, so covering the first period's
        // interest keeps every later principal portion positive.
        let period_rate =
            self.annual_rate / Decimal::from(payment_frequency.periods_per_year());
        let first_interest = round_money(self.original_amount * period_rate);
        if self.payment_amount <= first_interest {
            return Err(Error::invalid_input(format!(
                "Payment amount {} does not cover the first period's interest of {}",
                self.payment_amount, first_interest
            )));
        }

        // term_periods is positive here, so the cast cannot wrap.
        let maturity_date = add_months(self.start_date, self.term_periods as u32)
            .ok_or_else(|| Error::invalid_input("Maturity date is out of range"))?;

        Ok(DebtTerms {
            kind,
            original_amount: self.original_amount,
            annual_rate: self.annual_rate,
            rate_type,
            start_date: self.start_date,
            term_periods: self.term_periods,
            amortization_periods,
            payment_amount: self.payment_amount,
            payment_frequency,
            payment_day: self.payment_day,
            maturity_date,
            lender: self.lender.filter(|l| !l.trim().is_empty()),
            description: self.description,
            mortgage_details: self.mortgage_details,
        })
    }
}

/// One projected payment of an amortization schedule. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationScheduleEntry {
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub payment_amount: Decimal,
    pub principal_portion: Decimal,
    pub interest_portion: Decimal,
    pub balance_after: Decimal,
}

/// Totals over a generated schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSummary {
    pub number_of_payments: u32,
    pub total_paid: Decimal,
    pub total_principal: Decimal,
    pub total_interest: Decimal,
    pub payoff_date: Option<NaiveDate>,
    /// Balance left when the schedule ran out of payments before payoff.
    pub residual_balance: Decimal,
}

/// Schedule plus its summary, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationScheduleResponse {
    pub account_id: String,
    pub entries: Vec<AmortizationScheduleEntry>,
    pub summary: AmortizationSummary,
}
