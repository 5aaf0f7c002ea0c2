#![doc = include_str!("../README.md")]

mod absolute;
mod arith;
mod date;
mod delta;
pub mod error;
mod format;
mod parse;
mod primitive;
#[cfg(feature = "serde")]
mod serialize;
mod template;
mod traits;

pub use absolute::AbsoluteDate;
pub use date::{CalendarDate, Overrides};
pub use delta::DateDelta;
pub use error::{Error, Field, Result};
pub use parse::Pattern;
pub use primitive::{AbsYear, Cycle, DayDiff, Dom, Doy, GrandCycle, Month, Year};
pub use traits::IntoMonth;

/// Number of cycles in a grand cycle.
pub const CYCLES_PER_GRAND_CYCLE: Cycle = 23;

/// Number of years in a cycle.
pub const YEARS_PER_CYCLE: Year = 13;

/// Number of years in a grand cycle (23 cycles of 13 years).
pub const YEARS_PER_GRAND_CYCLE: AbsYear = CYCLES_PER_GRAND_CYCLE as AbsYear * YEARS_PER_CYCLE as AbsYear;

/// Number of months in a year, the last one being intercalary.
pub const MONTHS_PER_YEAR: u8 = 10;

/// Days of every month except the intercalary one.
pub const DAYS_PER_MONTH: Dom = 34;

/// Days of the intercalary month in a common year (one more in leap years).
pub const INTERCALARY_DAYS: Dom = 6;

/// Days of a common year (9 months of 34 days and 6 intercalary days).
pub const COMMON_YEAR_DAYS: Doy = 312;

/// Days of a leap year.
pub const LEAP_YEAR_DAYS: Doy = 313;

/// Leap years in a grand cycle: 4 in each of the first 22 cycles and 5 in the last.
pub const LEAPS_PER_GRAND_CYCLE: AbsYear = 4 * (CYCLES_PER_GRAND_CYCLE as AbsYear - 1) + 5;

/// Days in any run of [`YEARS_PER_GRAND_CYCLE`] consecutive years.
///
/// The leap pattern repeats every grand cycle, so the span does not depend on which year the run
/// starts at.
pub const DAYS_PER_GRAND_CYCLE: DayDiff =
    YEARS_PER_GRAND_CYCLE * COMMON_YEAR_DAYS as DayDiff + LEAPS_PER_GRAND_CYCLE;

/// The last absolute year whose grand cycle still fits a [`GrandCycle`].
pub const MAX_ABSOLUTE_YEAR: AbsYear = YEARS_PER_GRAND_CYCLE * GrandCycle::MAX as AbsYear;

/// Is the year `_:cycle:year` a leap year (313 days instead of 312).
///
/// Every third year of a cycle is leap (3, 6, 9 and 12) and the final year of the final cycle
/// (`_:23:13`) is leap as well. The ranges are not checked; out of range input only gives a
/// meaningless answer.
pub const fn is_leap_year(cycle: Cycle, year: Year) -> bool {
    year % 3 == 0 || (cycle == CYCLES_PER_GRAND_CYCLE && year == YEARS_PER_CYCLE)
}

/// The number of days in a month of the given year.
pub const fn days_in_month(cycle: Cycle, year: Year, month: Month) -> Dom {
    match month {
        Month::Neyu if is_leap_year(cycle, year) => INTERCALARY_DAYS + 1,
        Month::Neyu => INTERCALARY_DAYS,
        _ => DAYS_PER_MONTH,
    }
}

/// The number of days in the given year.
pub const fn days_in_year(cycle: Cycle, year: Year) -> Doy {
    if is_leap_year(cycle, year) {
        LEAP_YEAR_DAYS
    } else {
        COMMON_YEAR_DAYS
    }
}

/// The number of days in an absolute year.
///
/// Unlike the calendar itself this accepts any year, including zero and negative ones, by
/// extending the cycle pattern backwards.
pub const fn absolute_days_in_year(year: AbsYear) -> Doy {
    let (_, cycle, year) = absolute::split_year(year);
    days_in_year(cycle, year)
}
