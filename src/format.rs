//! Rendering dates through `%` templates (see [`crate::template`] for the codes).

use core::fmt::{self, Write};

use crate::{
    CalendarDate, DAYS_PER_MONTH, Month, YEARS_PER_CYCLE, YEARS_PER_GRAND_CYCLE,
    template::{Numeric, Template, Token},
};

/// Raw values of the five fields of a date, not necessarily valid.
///
/// Parsing accumulates captures into this before the date is checked, and renders it when it
/// reports an overwritten field, so rendering works on this rather than on [`CalendarDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fields {
    pub grand_cycle: i64,
    pub cycle: i64,
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

impl Fields {
    /// The first day of the calendar; every field at its minimum.
    pub const MIN: Self = Self {
        grand_cycle: 1,
        cycle: 1,
        year: 1,
        month: 1,
        day: 1,
    };

    fn absolute_year(&self) -> i64 {
        YEARS_PER_GRAND_CYCLE
            .saturating_mul(self.grand_cycle.saturating_sub(1))
            .saturating_add((YEARS_PER_CYCLE as i64).saturating_mul(self.cycle.saturating_sub(1)))
            .saturating_add(self.year)
    }

    fn day_of_year(&self) -> i64 {
        (DAYS_PER_MONTH as i64)
            .saturating_mul(self.month.saturating_sub(1))
            .saturating_add(self.day)
    }

    fn numeric(&self, value: Numeric) -> i64 {
        match value {
            Numeric::GrandCycle => self.grand_cycle,
            Numeric::Cycle => self.cycle,
            Numeric::Year => self.year,
            Numeric::Month => self.month,
            Numeric::Day => self.day,
            Numeric::DayOfYear => self.day_of_year(),
            Numeric::AbsoluteYear => self.absolute_year(),
        }
    }

    fn month_enum(&self) -> Option<Month> {
        u8::try_from(self.month).ok().and_then(Month::from_number)
    }

    /// Write every token in order; a month out of range is written as its number.
    pub fn write(&self, template: &Template, out: &mut impl Write) -> fmt::Result {
        for token in template.tokens() {
            match token {
                Token::Numeric { value, width } => {
                    write!(out, "{:0width$}", self.numeric(*value), width = *width)?
                }
                Token::MonthAbbrev => match self.month_enum() {
                    Some(month) => out.write_str(month.abbrev())?,
                    None => write!(out, "{}", self.month)?,
                },
                Token::MonthName => match self.month_enum() {
                    Some(month) => out.write_str(month.name())?,
                    None => write!(out, "{}", self.month)?,
                },
                Token::Percent => out.write_char('%')?,
                Token::Literal(text) => out.write_str(text)?,
            }
        }
        Ok(())
    }

    pub fn render(&self, template: &Template) -> String {
        let mut out = String::new();
        // writing into a `String` does not fail
        let _ = self.write(template, &mut out);
        out
    }
}

impl From<&CalendarDate> for Fields {
    fn from(value: &CalendarDate) -> Self {
        Self {
            grand_cycle: value.grand_cycle() as i64,
            cycle: value.cycle() as i64,
            year: value.year() as i64,
            month: value.month().get() as i64,
            day: value.day() as i64,
        }
    }
}

impl CalendarDate {
    /// Render this date through a template, the equivalent of `strftime`.
    ///
    /// ```
    /// # use cleressian::CalendarDate;
    /// let date = CalendarDate::new(2, 5, 9, 3, 12).unwrap();
    /// assert_eq!(date.format("%x"), "2:5:9 Enna 12");
    /// assert_eq!(date.format("%X"), "0360.080");
    /// assert_eq!(date.format("%b %02d, %g:%c:%y"), "Enn 12, 2:5:9");
    /// ```
    pub fn format(&self, template: &str) -> String {
        Fields::from(self).render(&Template::compile(template))
    }
}

/// Same as `%x`.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = Template::compile(crate::template::HIERARCHICAL);
        Fields::from(self).write(&template, f)
    }
}
