use chrono::{Months, NaiveDate};

/// Adds whole calendar months, clamping to the last day of shorter months.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
