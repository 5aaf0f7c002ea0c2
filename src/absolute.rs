//! Linear (year, day of year) projection of dates and the conversions to and from it.

use core::fmt;

use crate::{
    AbsYear, CYCLES_PER_GRAND_CYCLE, CalendarDate, Cycle, DAYS_PER_MONTH, Doy, Error, Field,
    GrandCycle, MAX_ABSOLUTE_YEAR, Result, Year, YEARS_PER_CYCLE, YEARS_PER_GRAND_CYCLE,
    days_in_year,
};

/// A date as the number of years since the epoch and the day within that year.
///
/// This is the pivot for ordering and arithmetic. The pair is not checked on creation since it is
/// mostly a buffer for conversions; see [`Self::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsoluteDate {
    /// Absolute year, `1:1:1` is year 1.
    pub year: AbsYear,
    /// Day within the year, starting from 1.
    pub day: Doy,
}

impl AbsoluteDate {
    /// The first day of the calendar.
    pub const MIN: Self = Self { year: 1, day: 1 };

    pub const fn new(year: AbsYear, day: Doy) -> Self {
        Self { year, day }
    }

    /// Does this pair name an existing date.
    pub fn is_valid(&self) -> bool {
        self.to_date().is_ok()
    }

    /// Convert back to the hierarchical date (see [`CalendarDate::from_absolute`]).
    pub fn to_date(&self) -> Result<CalendarDate> {
        CalendarDate::from_absolute(self.year, self.day)
    }
}

impl From<CalendarDate> for AbsoluteDate {
    fn from(value: CalendarDate) -> Self {
        value.to_absolute()
    }
}

impl TryFrom<AbsoluteDate> for CalendarDate {
    type Error = Error;

    fn try_from(value: AbsoluteDate) -> Result<Self> {
        value.to_date()
    }
}

impl fmt::Display for AbsoluteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}.{:03}", self.year, self.day)
    }
}

/// Split an absolute year into grand cycle, cycle and year of cycle.
///
/// Total over the whole integer range: years before 1 extend the pattern backwards (grand cycle 0
/// and below), which is what arithmetic needs to measure year lengths before checking the result.
pub(crate) const fn split_year(year: AbsYear) -> (i64, Cycle, Year) {
    let zero_based = year as i128 - 1;
    let grand_cycle = zero_based.div_euclid(YEARS_PER_GRAND_CYCLE as i128) + 1;
    let cycle = zero_based
        .div_euclid(YEARS_PER_CYCLE as i128)
        .rem_euclid(CYCLES_PER_GRAND_CYCLE as i128)
        + 1;
    let year = zero_based.rem_euclid(YEARS_PER_CYCLE as i128) + 1;
    (grand_cycle as i64, cycle as Cycle, year as Year)
}

/// Split a day of the year into month and day of month, ignoring how long the year is.
///
/// A zero day is treated like the first day; callers check the range beforehand.
pub(crate) const fn split_doy(day: Doy) -> (u8, u8) {
    let zero_based = day.saturating_sub(1);
    let month = zero_based / DAYS_PER_MONTH as Doy + 1;
    let day = zero_based % DAYS_PER_MONTH as Doy + 1;
    (month as u8, day as u8)
}

impl CalendarDate {
    /// Create a date from the absolute year and the day within that year.
    ///
    /// The year must be on `1..=`[`MAX_ABSOLUTE_YEAR`] and the day must exist in that year (312
    /// days, or 313 for leap years).
    ///
    /// For every date `a` and every valid pair `(y, d)`:
    /// `from_absolute(a.to_absolute()) == a` and `from_absolute(y, d).to_absolute() == (y, d)`.
    pub fn from_absolute(year: AbsYear, day: Doy) -> Result<Self> {
        if !(1..=MAX_ABSOLUTE_YEAR).contains(&year) {
            return Err(Error::Validation {
                field: Field::AbsoluteYear,
                min: 1,
                max: MAX_ABSOLUTE_YEAR,
                value: year,
            });
        }

        let (grand_cycle, cycle, year_of_cycle) = split_year(year);
        let max = days_in_year(cycle, year_of_cycle);
        if !(1..=max).contains(&day) {
            return Err(Error::Validation {
                field: Field::DayOfYear,
                min: 1,
                max: max as i64,
                value: day as i64,
            });
        }

        let (month, day) = split_doy(day);
        // the range check above keeps the grand cycle within `GrandCycle`
        Self::new(grand_cycle as GrandCycle, cycle, year_of_cycle, month, day)
    }

    /// Project this date onto the absolute year and day of year.
    pub const fn to_absolute(&self) -> AbsoluteDate {
        AbsoluteDate {
            year: self.absolute_year(),
            day: self.day_of_year(),
        }
    }

    /// The number of years since the epoch (`1:1:1` is year 1).
    pub const fn absolute_year(&self) -> AbsYear {
        YEARS_PER_GRAND_CYCLE * (self.grand_cycle() as AbsYear - 1)
            + YEARS_PER_CYCLE as AbsYear * (self.cycle() as AbsYear - 1)
            + self.year() as AbsYear
    }

    /// The day within the year, from 1 to 313.
    pub const fn day_of_year(&self) -> Doy {
        DAYS_PER_MONTH as Doy * (self.month().get() as Doy - 1) + self.day() as Doy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dom, Month, absolute_days_in_year};

    #[test]
    fn test_epoch_is_year_one() {
        let date = CalendarDate::new(1, 1, 1, 1, 1).unwrap();
        assert_eq!(date.to_absolute(), AbsoluteDate::new(1, 1));
        assert_eq!(CalendarDate::from_absolute(1, 1).unwrap(), date);
    }

    #[test]
    fn test_split_year() {
        let test = |abs: AbsYear, expected: (i64, Cycle, Year)| {
            assert_eq!(split_year(abs), expected, "absolute year {abs}");
        };

        test(1, (1, 1, 1));
        test(13, (1, 1, 13));
        test(14, (1, 2, 1));
        test(286, (1, 22, 13));
        test(287, (1, 23, 1));
        test(299, (1, 23, 13));
        test(300, (2, 1, 1));
        test(598, (2, 23, 13));
        test(599, (3, 1, 1));
        test(0, (0, 23, 13));
        test(-298, (0, 1, 1));
        test(-299, (-1, 23, 13));
    }

    #[test]
    fn test_split_year_extremes_do_not_overflow() {
        let (_, c, y) = split_year(AbsYear::MIN);
        assert!((1..=23).contains(&c) && (1..=13).contains(&y));
        let (_, c, y) = split_year(AbsYear::MAX);
        assert!((1..=23).contains(&c) && (1..=13).contains(&y));
    }

    #[test]
    fn test_split_doy() {
        assert_eq!(split_doy(1), (1, 1));
        assert_eq!(split_doy(34), (1, 34));
        assert_eq!(split_doy(35), (2, 1));
        assert_eq!(split_doy(306), (9, 34));
        assert_eq!(split_doy(307), (10, 1));
        assert_eq!(split_doy(313), (10, 7));
    }

    #[test]
    fn test_from_absolute_month_boundaries() {
        let test = |day: Doy, (m, d): (Month, Dom)| {
            let date = CalendarDate::from_absolute(3, day).unwrap();
            assert_eq!((date.month(), date.day()), (m, d), "day of year {day}");
            assert_eq!(date.day_of_year(), day);
        };

        test(1, (Month::Sirelle, 1));
        test(34, (Month::Sirelle, 34));
        test(35, (Month::Tiri, 1));
        test(68, (Month::Tiri, 34));
        test(69, (Month::Enna, 1));
        test(306, (Month::Brilia, 34));
        test(307, (Month::Neyu, 1));
        test(312, (Month::Neyu, 6));
        test(313, (Month::Neyu, 7));
    }

    #[test]
    fn test_from_absolute_rejects_leap_day_in_common_year() {
        assert_eq!(
            CalendarDate::from_absolute(4, 313),
            Err(Error::Validation {
                field: Field::DayOfYear,
                min: 1,
                max: 312,
                value: 313
            })
        );
        assert!(CalendarDate::from_absolute(3, 314).is_err());
        assert!(CalendarDate::from_absolute(3, 0).is_err());
    }

    #[test]
    fn test_from_absolute_rejects_years_before_epoch() {
        assert!(matches!(
            CalendarDate::from_absolute(0, 1),
            Err(Error::Validation {
                field: Field::AbsoluteYear,
                ..
            })
        ));
        assert!(CalendarDate::from_absolute(-5, 1).is_err());
        assert!(CalendarDate::from_absolute(MAX_ABSOLUTE_YEAR, 1).is_ok());
        assert!(CalendarDate::from_absolute(MAX_ABSOLUTE_YEAR + 1, 1).is_err());
    }

    #[test]
    fn test_round_trip_two_grand_cycles() {
        for year in 1..=2 * YEARS_PER_GRAND_CYCLE + 1 {
            for day in 1..=absolute_days_in_year(year) {
                let date = CalendarDate::from_absolute(year, day).unwrap();
                assert_eq!(date.to_absolute(), AbsoluteDate::new(year, day));
                assert_eq!(date.to_absolute().to_date().unwrap(), date);
            }
        }
    }

    #[test]
    fn test_absolute_ordering_is_lexicographic() {
        assert!(AbsoluteDate::new(1, 313) < AbsoluteDate::new(2, 1));
        assert!(AbsoluteDate::new(2, 1) < AbsoluteDate::new(2, 2));
    }

    #[test]
    fn test_absolute_is_valid() {
        assert!(AbsoluteDate::new(3, 313).is_valid());
        assert!(!AbsoluteDate::new(2, 313).is_valid());
        assert!(!AbsoluteDate::new(0, 1).is_valid());
        assert!(AbsoluteDate::MIN.is_valid());
    }

    #[test]
    fn test_absolute_display() {
        assert_eq!(AbsoluteDate::new(3, 41).to_string(), "0003.041");
        assert_eq!(AbsoluteDate::new(12345, 313).to_string(), "12345.313");
    }
}
