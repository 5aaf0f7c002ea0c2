//! Adding offsets to dates and measuring the distance between them.

use core::ops::{Add, Sub};

use tracing::trace;

use crate::{
    AbsYear, AbsoluteDate, CalendarDate, DAYS_PER_GRAND_CYCLE, DateDelta, DayDiff, Doy, Error,
    MAX_ABSOLUTE_YEAR, Result, YEARS_PER_GRAND_CYCLE, absolute_days_in_year,
};

/// Carry an out of range day of the year into the year until it names a real day.
///
/// Whole grand cycles are skipped at once since any 299 consecutive years have the same length,
/// the rest is walked one year at a time so each year's own length (312 or 313) is honored.
fn normalize(year: AbsYear, day: DayDiff) -> Result<AbsoluteDate> {
    let mut year = year;
    let mut day = day;

    if !(1..=DAYS_PER_GRAND_CYCLE).contains(&day) {
        let zero_based = day.checked_sub(1).ok_or(Error::Overflow)?;
        let grand_cycles = zero_based.div_euclid(DAYS_PER_GRAND_CYCLE);
        year = grand_cycles
            .checked_mul(YEARS_PER_GRAND_CYCLE)
            .and_then(|years| year.checked_add(years))
            .ok_or(Error::Overflow)?;
        day = zero_based.rem_euclid(DAYS_PER_GRAND_CYCLE) + 1;
        trace!(grand_cycles, year, day, "carried whole grand cycles");
    }

    loop {
        let length = absolute_days_in_year(year) as DayDiff;
        if day <= length {
            break;
        }
        day -= length;
        year = year.checked_add(1).ok_or(Error::Overflow)?;
    }

    // at most 313 at this point
    Ok(AbsoluteDate::new(year, day as Doy))
}

impl CalendarDate {
    /// Return the date the given number of years and days later.
    ///
    /// A bare integer is a number of days. The years are added to the absolute year and the days to
    /// the day of the year, then the day is carried through the following (or preceding) years
    /// according to their lengths. Fails with [`Error::OutOfRange`] if the result is before
    /// `1:1:1` or past the largest grand cycle.
    pub fn checked_add(&self, delta: impl Into<DateDelta>) -> Result<Self> {
        let delta = delta.into();
        let start = self.to_absolute();

        let year = start.year.checked_add(delta.years).ok_or(Error::Overflow)?;
        let day = (start.day as DayDiff)
            .checked_add(delta.days)
            .ok_or(Error::Overflow)?;

        let end = normalize(year, day)?;
        if !(1..=MAX_ABSOLUTE_YEAR).contains(&end.year) {
            return Err(Error::OutOfRange { year: end.year });
        }

        end.to_date()
    }

    /// Return the date the given number of years and days earlier (see [`Self::checked_add`]).
    pub fn checked_sub(&self, delta: impl Into<DateDelta>) -> Result<Self> {
        self.checked_add(delta.into().checked_neg()?)
    }

    /// The signed distance from `other` to this date; negative when this date is earlier.
    pub fn since(&self, other: &Self) -> DateDelta {
        let distance = Self::distance(self, other);
        if self < other { -distance } else { distance }
    }

    /// The number of years and days between two dates regardless of their order.
    ///
    /// With `x` the earlier date, the days line up first: if the day of the year of `x` is not
    /// past the one of `y` the days are a plain difference, otherwise they wrap through the rest of
    /// the year of `x` and that year is no longer counted. The years are what remains between the
    /// two absolute years.
    pub fn distance(x: &Self, y: &Self) -> DateDelta {
        let (x, y) = if x <= y { (x, y) } else { (y, x) };
        let (ax, ay) = (x.to_absolute(), y.to_absolute());

        if ax.day <= ay.day {
            DateDelta::new(ay.year - ax.year, (ay.day - ax.day) as DayDiff)
        } else {
            let rest_of_year = (absolute_days_in_year(ax.year) - ax.day) as DayDiff;
            DateDelta::new(ay.year - ax.year - 1, ay.day as DayDiff + rest_of_year)
        }
    }
}

impl Add<DateDelta> for CalendarDate {
    type Output = Result<Self>;

    fn add(self, rhs: DateDelta) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Add<DayDiff> for CalendarDate {
    type Output = Result<Self>;

    fn add(self, rhs: DayDiff) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub<DateDelta> for CalendarDate {
    type Output = Result<Self>;

    fn sub(self, rhs: DateDelta) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl Sub<DayDiff> for CalendarDate {
    type Output = Result<Self>;

    fn sub(self, rhs: DayDiff) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl Sub for CalendarDate {
    type Output = DateDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        self.since(&rhs)
    }
}
