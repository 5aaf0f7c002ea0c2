//! Parsing dates out of strings with the `%` templates used for formatting.
//!
//! A template is compiled once into an anchored regex with one capture group per code and kept
//! in a process wide cache. The captures are then folded into the fields of a date:
//!
//! 1. `%Y` gives the grand cycle, cycle and year (the first day of that absolute year);
//! 2. `%j` gives the month and the day;
//! 3. `%g`, `%c`, `%y`, the month (`%m`, `%b` or `%B`) and `%d` are applied in that order.
//!
//! A field that is given again with a different value is overwritten and a warning is logged.
//! Fields never given keep their minimum. The result is checked as a whole once all captures are
//! applied.

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex, PoisonError},
};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    AbsYear, CalendarDate, Doy, Error, Field, LEAP_YEAR_DAYS, Month, Result,
    absolute::split_doy,
    format::Fields,
    template::{self, Numeric, Template, Token},
};

/// How an overwritten grand cycle, cycle or year is reported.
const YEAR_CONTEXT: &str = "%04Y (%g:%c:%y)";

/// How an overwritten month or day is reported.
const DAY_CONTEXT: &str = ".%03j (%B %02d)";

/// The fields set one by one, in order of application.
const PLAIN_FIELDS: [Field; 5] = [
    Field::GrandCycle,
    Field::Cycle,
    Field::Year,
    Field::Month,
    Field::Day,
];

/// Templates kept by [`Pattern::cached`] before the cache starts over.
const CACHE_CAPACITY: usize = 64;

static PATTERNS: Lazy<Mutex<Cache>> = Lazy::new(Default::default);

/// Compiled patterns by template, emptied once it reaches [`CACHE_CAPACITY`].
#[derive(Default)]
struct Cache {
    patterns: HashMap<String, Arc<Pattern>>,
}

impl Cache {
    fn get_or_compile(&mut self, template: &str) -> Result<Arc<Pattern>> {
        if let Some(pattern) = self.patterns.get(template) {
            return Ok(Arc::clone(pattern));
        }

        let pattern = Arc::new(Pattern::new(template)?);
        debug!(template, regex = pattern.regex.as_str(), "compiled date template");
        if self.patterns.len() >= CACHE_CAPACITY {
            debug!(size = self.patterns.len(), "date template cache is full, clearing it");
            self.patterns.clear();
        }
        self.patterns.insert(template.to_string(), Arc::clone(&pattern));
        Ok(pattern)
    }
}

/// What a capture group of a [`Pattern`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Numeric(Numeric),
    MonthAbbrev,
    MonthName,
}

impl Slot {
    /// The field a capture of this slot sets directly, `None` for `%Y` and `%j`.
    const fn field(&self) -> Option<Field> {
        Some(match self {
            Self::Numeric(Numeric::GrandCycle) => Field::GrandCycle,
            Self::Numeric(Numeric::Cycle) => Field::Cycle,
            Self::Numeric(Numeric::Year) => Field::Year,
            Self::Numeric(Numeric::Month) | Self::MonthAbbrev | Self::MonthName => Field::Month,
            Self::Numeric(Numeric::Day) => Field::Day,
            Self::Numeric(Numeric::AbsoluteYear | Numeric::DayOfYear) => return None,
        })
    }
}

/// A template compiled for parsing.
///
/// ```
/// # use cleressian::{CalendarDate, Pattern};
/// let pattern = Pattern::new("%b %d, %g:%c:%y").unwrap();
/// let date = pattern.parse("Enn 12, 2:5:9").unwrap();
/// assert_eq!(date, CalendarDate::new(2, 5, 9, "Enna", 12).unwrap());
/// assert!(pattern.parse("Enna 12, 2:5:9").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    regex: Regex,
    slots: Vec<Slot>,
}

impl Pattern {
    /// Compile a template.
    ///
    /// Numeric codes match at least as many ASCII digits as their width (one by default), month
    /// names match exactly and everything else matches literally.
    pub fn new(template: &str) -> Result<Self> {
        let mut source = String::from("^");
        let mut slots = Vec::new();

        for token in Template::compile(template).tokens() {
            match token {
                Token::Numeric { value, width } => {
                    source.push_str(&format!("([0-9]{{{},}})", (*width).max(1)));
                    slots.push(Slot::Numeric(*value));
                }
                Token::MonthAbbrev => {
                    source.push_str(&alternation(Month::abbrev));
                    slots.push(Slot::MonthAbbrev);
                }
                Token::MonthName => {
                    source.push_str(&alternation(Month::name));
                    slots.push(Slot::MonthName);
                }
                Token::Percent => source.push('%'),
                Token::Literal(text) => source.push_str(&regex::escape(text)),
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| Error::Pattern {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            slots,
        })
    }

    /// Same as [`Self::new`] but shared through the process wide cache.
    ///
    /// The cache holds a handful of templates and is emptied once it is full, so templates built
    /// at runtime (from user input for instance) are better compiled with [`Self::new`] and kept
    /// by the caller.
    pub fn cached(template: &str) -> Result<Arc<Self>> {
        PATTERNS
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_compile(template)
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parse a complete string into a date.
    pub fn parse(&self, input: &str) -> Result<CalendarDate> {
        let captures = self
            .regex
            .captures(input)
            .ok_or_else(|| Error::FormatMismatch {
                input: input.to_string(),
                template: self.template.clone(),
            })?;

        // every group takes part in a match, group 0 is the whole input
        let values: Vec<(Slot, &str)> = self
            .slots
            .iter()
            .zip(captures.iter().skip(1))
            .map(|(slot, group)| (*slot, group.map_or("", |m| m.as_str())))
            .collect();

        Resolver::default().resolve(&values)
    }
}

/// A regex group matching any of the ten months by `name`.
fn alternation(name: fn(&Month) -> &'static str) -> String {
    let names: Vec<&str> = Month::ALL.iter().map(name).collect();
    format!("({})", names.join("|"))
}

fn number(field: Field, text: &str) -> Result<i64> {
    text.parse().map_err(|_| Error::InvalidNumber {
        field,
        text: text.to_string(),
    })
}

/// Fields gathered so far, along with which of them the input has set.
struct Resolver {
    fields: Fields,
    set: Vec<Field>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            fields: Fields::MIN,
            set: Vec::with_capacity(PLAIN_FIELDS.len()),
        }
    }
}

impl Resolver {
    fn resolve(mut self, values: &[(Slot, &str)]) -> Result<CalendarDate> {
        for &(slot, text) in values {
            if slot == Slot::Numeric(Numeric::AbsoluteYear) {
                let year: AbsYear = number(Field::AbsoluteYear, text)?;
                let first = CalendarDate::from_absolute(year, 1)?;
                self.assign(Field::GrandCycle, first.grand_cycle() as i64);
                self.assign(Field::Cycle, first.cycle() as i64);
                self.assign(Field::Year, first.year() as i64);
            }
        }

        for &(slot, text) in values {
            if slot == Slot::Numeric(Numeric::DayOfYear) {
                let day = number(Field::DayOfYear, text)?;
                if !(1..=LEAP_YEAR_DAYS as i64).contains(&day) {
                    return Err(Error::Validation {
                        field: Field::DayOfYear,
                        min: 1,
                        max: LEAP_YEAR_DAYS as i64,
                        value: day,
                    });
                }
                let (month, day) = split_doy(day as Doy);
                self.assign(Field::Month, month as i64);
                self.assign(Field::Day, day as i64);
            }
        }

        for field in PLAIN_FIELDS {
            for &(slot, text) in values.iter().filter(|(slot, _)| slot.field() == Some(field)) {
                let value = match slot {
                    Slot::MonthAbbrev => Month::from_abbrev(text)
                        .ok_or_else(|| Error::UnknownMonth(text.to_string()))?
                        .get() as i64,
                    Slot::MonthName => Month::from_name(text)?.get() as i64,
                    Slot::Numeric(_) => number(field, text)?,
                };
                self.assign(field, value);
            }
        }

        let Fields {
            grand_cycle,
            cycle,
            year,
            month,
            day,
        } = self.fields;
        CalendarDate::from_raw(grand_cycle, cycle, year, month, day)
    }

    /// Set a field, warning when it overwrites a different value the input gave before.
    fn assign(&mut self, field: Field, value: i64) {
        let slot = match field {
            Field::GrandCycle => &mut self.fields.grand_cycle,
            Field::Cycle => &mut self.fields.cycle,
            Field::Year => &mut self.fields.year,
            Field::Month => &mut self.fields.month,
            Field::Day => &mut self.fields.day,
            Field::AbsoluteYear | Field::DayOfYear => return,
        };

        if !self.set.contains(&field) {
            *slot = value;
            self.set.push(field);
            return;
        }
        if *slot == value {
            return;
        }

        let context = Template::compile(match field {
            Field::Month | Field::Day => DAY_CONTEXT,
            _ => YEAR_CONTEXT,
        });
        let previous = self.fields.render(&context);
        match field {
            Field::GrandCycle => self.fields.grand_cycle = value,
            Field::Cycle => self.fields.cycle = value,
            Field::Year => self.fields.year = value,
            Field::Month => self.fields.month = value,
            _ => self.fields.day = value,
        }
        let current = self.fields.render(&context);

        warn!(
            field = %field,
            %previous,
            %current,
            "parsed {field} overwrites an earlier value"
        );
    }
}

impl CalendarDate {
    /// Parse a date with a template, the equivalent of `strptime`.
    ///
    /// The compiled template is cached, see [`Pattern`] to hold on to it directly.
    ///
    /// ```
    /// # use cleressian::CalendarDate;
    /// let date = CalendarDate::parse("0003.041", "%X").unwrap();
    /// assert_eq!(date, CalendarDate::new(1, 1, 3, "Tiri", 7).unwrap());
    /// ```
    pub fn parse(input: &str, template: &str) -> Result<Self> {
        Pattern::cached(template)?.parse(input)
    }
}

/// Parse the `%x` form, the inverse of [`core::fmt::Display`].
impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::cached(template::HIERARCHICAL)?.parse(s)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` and collect the warnings it logs.
    fn warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    fn date(g: u32, c: u8, y: u8, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(g, c, y, m, d).unwrap()
    }

    #[test]
    fn test_parse_absolute_shorthand() {
        assert_eq!(CalendarDate::parse("0003.041", "%X"), Ok(date(1, 1, 3, 2, 7)));
        assert_eq!(CalendarDate::parse("0299.313", "%X"), Ok(date(1, 23, 13, 10, 7)));
        assert_eq!(CalendarDate::parse("11662.001", "%X"), Ok(date(40, 1, 1, 1, 1)));
    }

    #[test]
    fn test_parse_hierarchical_shorthand() {
        assert_eq!(CalendarDate::parse("2:5:9 Enna 12", "%x"), Ok(date(2, 5, 9, 3, 12)));
        assert_eq!("2:5:9 Enna 12".parse(), Ok(date(2, 5, 9, 3, 12)));
        assert_eq!("1:23:13 Neyu 7".parse(), Ok(date(1, 23, 13, 10, 7)));
    }

    #[test]
    fn test_mismatch_names_input_and_template() {
        assert_eq!(
            CalendarDate::parse("2:5:9 Enn 12", "%x"),
            Err(Error::FormatMismatch {
                input: "2:5:9 Enn 12".to_string(),
                template: "%x".to_string(),
            })
        );
        assert!(CalendarDate::parse("0003.041 trailing", "%X").is_err());
        assert!(CalendarDate::parse("leading 0003.041", "%X").is_err());
    }

    #[test]
    fn test_width_is_a_minimum() {
        assert!(CalendarDate::parse("7", "%02d").is_err());
        assert_eq!(CalendarDate::parse("07", "%02d"), Ok(date(1, 1, 1, 1, 7)));
        assert_eq!(CalendarDate::parse("007", "%02d"), Ok(date(1, 1, 1, 1, 7)));
        assert_eq!(CalendarDate::parse("3", "%00m"), Ok(date(1, 1, 1, 3, 1)));
    }

    #[test]
    fn test_literals_are_escaped() {
        assert_eq!(CalendarDate::parse("1.2.3", "%g.%c.%y"), Ok(date(1, 2, 3, 1, 1)));
        assert!(CalendarDate::parse("1x2x3", "%g.%c.%y").is_err());
        assert_eq!(CalendarDate::parse("(5)+[6]", "(%m)+[%d]"), Ok(date(1, 1, 1, 5, 6)));
        assert_eq!(CalendarDate::parse("100% 3", "100%% %d"), Ok(date(1, 1, 1, 1, 3)));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(CalendarDate::parse("Kle", "%b"), Ok(date(1, 1, 1, 5, 1)));
        assert_eq!(CalendarDate::parse("Klesni", "%B"), Ok(date(1, 1, 1, 5, 1)));
        assert!(CalendarDate::parse("Klesni", "%b").is_err());
        assert!(CalendarDate::parse("klesni", "%B").is_err());
    }

    #[test]
    fn test_unset_fields_keep_their_minimum() {
        assert_eq!(CalendarDate::parse("", ""), Ok(CalendarDate::MIN));
        assert_eq!(CalendarDate::parse("4", "%y"), Ok(date(1, 1, 4, 1, 1)));
    }

    #[test]
    fn test_day_of_year_range() {
        assert_eq!(
            CalendarDate::parse("314", "%j"),
            Err(Error::Validation {
                field: Field::DayOfYear,
                min: 1,
                max: 313,
                value: 314,
            })
        );
        // the leap day of an unset (common) year is caught on the final check
        assert_eq!(
            CalendarDate::parse("313", "%j"),
            Err(Error::Validation {
                field: Field::Day,
                min: 1,
                max: 6,
                value: 7,
            })
        );
        assert_eq!(
            CalendarDate::parse("3 313", "%y %j"),
            Ok(date(1, 1, 3, 10, 7))
        );
    }

    #[test]
    fn test_absolute_year_range() {
        assert!(matches!(
            CalendarDate::parse("0000.001", "%X"),
            Err(Error::Validation {
                field: Field::AbsoluteYear,
                ..
            })
        ));
    }

    #[test]
    fn test_field_ranges_are_checked_after_resolution() {
        assert!(matches!(
            CalendarDate::parse("11", "%m"),
            Err(Error::Validation {
                field: Field::Month,
                ..
            })
        ));
        assert!(matches!(
            CalendarDate::parse("10 7", "%m %d"),
            Err(Error::Validation {
                field: Field::Day,
                ..
            })
        ));
        assert!(matches!(
            CalendarDate::parse("0", "%g"),
            Err(Error::Validation {
                field: Field::GrandCycle,
                ..
            })
        ));
    }

    #[test]
    fn test_numbers_too_long_for_an_integer() {
        let digits = "99999999999999999999";
        assert_eq!(
            CalendarDate::parse(digits, "%d"),
            Err(Error::InvalidNumber {
                field: Field::Day,
                text: digits.to_string(),
            })
        );
    }

    #[test]
    fn test_explicit_fields_overwrite_absolute_ones() {
        let (parsed, logs) = warnings(|| CalendarDate::parse("0003.041 1:1:4", "%X %g:%c:%y"));
        assert_eq!(parsed, Ok(date(1, 1, 4, 2, 7)));
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("field=year"), "{logs}");
        assert!(logs.contains("0003 (1:1:3)"), "{logs}");
        assert!(logs.contains("0004 (1:1:4)"), "{logs}");
    }

    #[test]
    fn test_later_occurrences_win() {
        let (parsed, logs) = warnings(|| CalendarDate::parse("3 5", "%d %d"));
        assert_eq!(parsed, Ok(date(1, 1, 1, 1, 5)));
        assert!(logs.contains("field=day"), "{logs}");
        assert!(logs.contains(".003 (Sirelle 03)"), "{logs}");
        assert!(logs.contains(".005 (Sirelle 05)"), "{logs}");

        let (parsed, logs) = warnings(|| CalendarDate::parse("Tir 5", "%b %m"));
        assert_eq!(parsed, Ok(date(1, 1, 1, 5, 1)));
        assert!(logs.contains("field=month"), "{logs}");
    }

    #[test]
    fn test_agreeing_fields_do_not_warn() {
        let (parsed, logs) = warnings(|| CalendarDate::parse("5 5 Sir 1", "%d %d %b %m"));
        assert_eq!(parsed, Ok(date(1, 1, 1, 1, 5)));
        assert!(logs.is_empty(), "{logs}");

        let (parsed, logs) = warnings(|| CalendarDate::parse("0003.041 1:1:3 Tiri 7", "%X %x"));
        assert_eq!(parsed, Ok(date(1, 1, 3, 2, 7)));
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_cache_shares_patterns() {
        let a = Pattern::cached("%d/%m").unwrap();
        let b = Pattern::cached("%d/%m").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.template(), "%d/%m");
        assert_eq!(a.parse("6/2"), Ok(date(1, 1, 1, 2, 6)));
    }

    #[test]
    fn test_cache_is_bounded() {
        let mut cache = Cache::default();
        for n in 0..3 * CACHE_CAPACITY {
            let template = format!("%d #{n}");
            let pattern = cache.get_or_compile(&template).unwrap();
            assert_eq!(pattern.parse(&format!("4 #{n}")), Ok(date(1, 1, 1, 1, 4)));
            assert!(cache.patterns.len() <= CACHE_CAPACITY);
        }

        // a hit does not compile again
        let a = cache.get_or_compile("%d #0").unwrap();
        let b = cache.get_or_compile("%d #0").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_shorthands_expand_before_literal_percent() {
        assert_eq!(
            CalendarDate::parse("%g:5:9 Enna 12", "%%x"),
            Ok(date(1, 5, 9, 3, 12))
        );
        assert!(CalendarDate::parse("%x", "%%x").is_err());
    }

    #[test]
    fn test_pattern_is_reusable() {
        let pattern = Pattern::new("%g:%c:%y").unwrap();
        assert_eq!(pattern.parse("1:2:3"), Ok(date(1, 2, 3, 1, 1)));
        assert_eq!(pattern.parse("2:1:1"), Ok(date(2, 1, 1, 1, 1)));
    }
}
