//! Error types for the calendar engine.

use core::fmt;

/// Names a value of a date, used to point at the culprit of a [`Error::Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    GrandCycle,
    Cycle,
    Year,
    Month,
    Day,
    AbsoluteYear,
    DayOfYear,
}

impl Field {
    /// Human readable name of the field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GrandCycle => "grand_cycle",
            Self::Cycle => "cycle",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::AbsoluteYear => "absolute year",
            Self::DayOfYear => "day of year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for all fallible operations of this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when a field is outside its allowed range.
    #[error("{field} must be on [{min}, {max}], not {value}")]
    Validation {
        /// The offending field.
        field: Field,
        /// Smallest allowed value.
        min: i64,
        /// Largest allowed value (may depend on other fields, e.g. days of the intercalary month).
        max: i64,
        /// The rejected value.
        value: i64,
    },

    /// Returned when a month name matches none of the ten months.
    #[error("month must be the full name of a month or an integer on [1, 10], not {0:?}")]
    UnknownMonth(String),

    /// Returned when a parsed number does not fit any value of its field.
    #[error("{field} cannot be {text:?}")]
    InvalidNumber {
        /// The field the number was parsed for.
        field: Field,
        /// The raw digits.
        text: String,
    },

    /// Returned when a date string does not match the template it is parsed with.
    #[error("date data {input:?} does not match format {template:?}")]
    FormatMismatch {
        /// The string being parsed.
        input: String,
        /// The template, before shorthand expansion.
        template: String,
    },

    /// Returned when a template cannot be compiled into a matcher.
    #[error("template {template:?} cannot be compiled: {reason}")]
    Pattern {
        /// The template, before shorthand expansion.
        template: String,
        /// Why compilation failed.
        reason: String,
    },

    /// Returned when an arithmetic result falls outside the calendar.
    #[error("absolute year {year} is outside the calendar")]
    OutOfRange {
        /// The absolute year the result landed on.
        year: i64,
    },

    /// Returned when applying an offset overflows the integer types.
    #[error("date arithmetic overflowed")]
    Overflow,
}

/// Shorthand for results of this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
