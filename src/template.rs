//! Compiles `%` templates into tokens shared by formatting and parsing.
//!
//! Codes:
//!
//! | code | meaning                                        | example            |
//! |------|------------------------------------------------|--------------------|
//! | `%g` | grand cycle                                    | 1, 2, 3, ...       |
//! | `%c` | cycle within the grand cycle                   | 1, 2, ..., 23      |
//! | `%y` | year within the cycle                          | 1, 2, ..., 13      |
//! | `%m` | month number                                   | 1, 2, ..., 10      |
//! | `%d` | day of the month                               | 1, 2, ..., 34      |
//! | `%j` | day of the year                                | 1, 2, ..., 313     |
//! | `%Y` | absolute year (`1:1:1` is year 1)              | 1, 2, 3, ...       |
//! | `%b` | abbreviated month name                         | Sir, Tir, ..., Ney |
//! | `%B` | full month name                                | Sirelle, ..., Neyu |
//! | `%x` | hierarchical date, shorthand for `%g:%c:%y %B %d` | 2:5:9 Enna 12   |
//! | `%X` | absolute date, shorthand for `%04Y.%03j`       | 0003.041           |
//! | `%%` | a literal `%`                                  | %                  |
//!
//! `%x` and `%X` are replaced textually before anything else, so `%%x` is a literal percent
//! followed by `g:%c:%y %B %d`. Numeric codes take an optional zero padding width of at most
//! 65535, `%04Y` is `%Y` padded to four digits. Any other `%` sequence is kept as literal text.

/// Shorthand for the hierarchical representation.
pub(crate) const HIERARCHICAL: &str = "%g:%c:%y %B %d";

/// Shorthand for the absolute representation.
pub(crate) const ABSOLUTE: &str = "%04Y.%03j";

/// A value a numeric code stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Numeric {
    GrandCycle,
    Cycle,
    Year,
    Month,
    Day,
    DayOfYear,
    AbsoluteYear,
}

impl Numeric {
    const fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'g' => Self::GrandCycle,
            'c' => Self::Cycle,
            'y' => Self::Year,
            'm' => Self::Month,
            'd' => Self::Day,
            'j' => Self::DayOfYear,
            'Y' => Self::AbsoluteYear,
            _ => return None,
        })
    }
}

/// One unit of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A number padded with zeros to at least `width` digits.
    Numeric { value: Numeric, width: usize },
    MonthAbbrev,
    MonthName,
    Percent,
    Literal(String),
}

/// A template split into tokens, with the shorthands already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Expand `%x` and `%X` textually, then split the template in a single left to right pass.
    pub fn compile(template: &str) -> Self {
        let expanded = template.replace("%x", HIERARCHICAL).replace("%X", ABSOLUTE);
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = expanded.as_str();

        while let Some(start) = rest.find('%') {
            literal.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            match code(after) {
                Some((token, consumed)) => {
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(core::mem::take(&mut literal)));
                    }
                    tokens.push(token);
                    rest = &after[consumed..];
                }
                None => {
                    literal.push('%');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Read a code right after a `%`, returning it with the number of bytes it spans.
///
/// A padding width that does not fit a `u16` makes the code unknown.
fn code(after: &str) -> Option<(Token, usize)> {
    let first = after.chars().next()?;

    let token = match first {
        '%' => Token::Percent,
        'b' => Token::MonthAbbrev,
        'B' => Token::MonthName,
        '0' => {
            // `%0Nk`: a zero, the width, then a numeric code
            let digits = after[1..].bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return None;
            }
            let width: u16 = after[1..1 + digits].parse().ok()?;
            let value = after[1 + digits..].chars().next().and_then(Numeric::from_code)?;
            let token = Token::Numeric {
                value,
                width: width as usize,
            };
            return Some((token, 2 + digits));
        }
        c => Token::Numeric {
            value: Numeric::from_code(c)?,
            width: 1,
        },
    };

    Some((token, first.len_utf8()))
}
