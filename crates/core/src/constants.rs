use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of fraction digits kept on monetary values.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// A remaining balance at or below this amount counts as paid off.
pub const PAID_OFF_EPSILON: Decimal = dec!(0.01);

/// Longest accepted term or amortization period, in months.
pub const MAX_TERM_PERIODS: i32 = 1200;

/// Largest accepted original or payment amount.
pub const MAX_MONEY_AMOUNT: Decimal = dec!(1000000000000);

/// Date format accepted on input and used for date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Notes attached to balance ledger entries, one per balance-affecting event.
pub mod balance_notes {
    pub const DEBT_INITIATED: &str = "debt initiated";
    pub const PAYMENT: &str = "payment";
    pub const BALANCE_SYNC: &str = "balance sync";
}
