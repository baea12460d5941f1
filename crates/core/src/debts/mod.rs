//! Debts module - debt instrument terms, the amortization calculator, and
//! the service that creates instruments and projects their schedules.

mod amortization;
mod debts_model;
mod debts_service;
mod debts_traits;

#[cfg(test)]
mod amortization_tests;

pub use amortization::{generate_schedule, summarize_schedule, total_payments, AmortizationSchedule};
pub use debts_model::{
    AmortizationScheduleEntry, AmortizationScheduleResponse, AmortizationSummary, DebtInstrument,
    DebtKind, DebtTerms, MortgageDetails, NewDebtInstrument, PaymentFrequency, RateType,
};
pub use debts_service::DebtService;
pub use debts_traits::{DebtRepositoryTrait, DebtServiceTrait};
