//! Conversions accepted wherever a month is expected.

use crate::{Month, Result};

/// Anything a month can be resolved from: its number, the enum itself or its full name.
///
/// The resolution is fallible and the error is only surfaced when the month is validated along
/// with the rest of the date (see [`crate::CalendarDate::new`]).
pub trait IntoMonth {
    fn into_month(self) -> Result<Month>;
}

impl IntoMonth for Month {
    fn into_month(self) -> Result<Month> {
        Ok(self)
    }
}

impl IntoMonth for u8 {
    fn into_month(self) -> Result<Month> {
        Month::try_from(self)
    }
}

impl IntoMonth for i32 {
    fn into_month(self) -> Result<Month> {
        Month::try_from(self as i64)
    }
}

impl IntoMonth for i64 {
    fn into_month(self) -> Result<Month> {
        Month::try_from(self)
    }
}

impl IntoMonth for &str {
    fn into_month(self) -> Result<Month> {
        Month::from_name(self)
    }
}

impl IntoMonth for String {
    fn into_month(self) -> Result<Month> {
        Month::from_name(&self)
    }
}

impl IntoMonth for Result<Month> {
    fn into_month(self) -> Result<Month> {
        self
    }
}
