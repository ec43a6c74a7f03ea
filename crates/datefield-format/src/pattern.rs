use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::locale::NameForm;

/// Rejected format pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty format pattern")]
    Empty,
    #[error("unrecognized pattern letter '{letter}'")]
    UnknownToken { letter: char },
    #[error("unsupported repetition of pattern letter: {token:?}")]
    UnsupportedRun { token: String },
    #[error("unterminated quoted literal starting at byte {index}")]
    UnterminatedQuote { index: usize },
}

/// Digit treatment for a year token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum YearDigits {
    /// `y`: as many digits as the year needs.
    Plain,
    /// `yy`: exactly two digits, windowed to 1970-2069 when parsed.
    Two,
    /// `yyyy`: exactly four digits, zero padded.
    Four,
}

/// One compiled element of a [`DatePattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternItem {
    Year(YearDigits),
    MonthNumber { padded: bool },
    MonthName(NameForm),
    DayOfMonth { padded: bool },
    WeekdayName(NameForm),
    Hour24 { padded: bool },
    Hour12 { padded: bool },
    Minute { padded: bool },
    Second { padded: bool },
    DayPeriod,
    Literal(String),
}

/// A compiled custom format pattern such as `dd/MM/yyyy EEE`.
///
/// Token grammar (runs of the same ASCII letter form one token):
///
/// | token | meaning |
/// |-------|---------|
/// | `y`, `yy`, `yyyy` | year (plain / two-digit windowed / four-digit) |
/// | `M`, `MM` | month number, optionally zero padded |
/// | `MMM`, `MMMM` | abbreviated / full month name |
/// | `d`, `dd` | day of month, optionally zero padded |
/// | `E`..`EEE`, `EEEE` | abbreviated / full weekday name |
/// | `H`, `HH` | hour 0-23 |
/// | `h`, `hh` | hour 1-12, pairs with `a` |
/// | `m`, `mm` | minute |
/// | `s`, `ss` | second |
/// | `a` | day period (AM/PM) marker |
///
/// Any other ASCII letter is rejected at compile time, as are runs of
/// unsupported length (`yyy`, `EEEEE`). Non-letter characters pass through
/// as literals; `'...'` quotes arbitrary text and `''` is an apostrophe.
/// Pattern literals are fixed text and never change with the locale.
///
/// Compilation is eager, so a stored `DatePattern` can always render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    items: Vec<PatternItem>,
}

impl DatePattern {
    /// Compile `source`, rejecting the whole pattern on the first bad token.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut items = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            if ch == '\'' {
                // A doubled quote is a literal apostrophe, quoted or not.
                if matches!(chars.peek(), Some(&(_, '\''))) {
                    chars.next();
                    literal.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some((_, quoted)) = chars.next() {
                    if quoted == '\'' {
                        if matches!(chars.peek(), Some(&(_, '\''))) {
                            chars.next();
                            literal.push('\'');
                        } else {
                            closed = true;
                            break;
                        }
                    } else {
                        literal.push(quoted);
                    }
                }
                if !closed {
                    return Err(PatternError::UnterminatedQuote { index });
                }
            } else if ch.is_ascii_alphabetic() {
                let count = consume_run(ch, &mut chars);
                flush_literal(&mut literal, &mut items);
                items.push(compile_token(ch, count)?);
            } else {
                literal.push(ch);
            }
        }
        flush_literal(&mut literal, &mut items);

        Ok(Self {
            source: source.to_string(),
            items,
        })
    }

    /// The original pattern text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn items(&self) -> &[PatternItem] {
        &self.items
    }
}

fn consume_run(first: char, chars: &mut Peekable<CharIndices<'_>>) -> usize {
    let mut count = 1;
    while let Some(&(_, next)) = chars.peek() {
        if next == first {
            chars.next();
            count += 1;
        } else {
            break;
        }
    }
    count
}

fn flush_literal(buf: &mut String, items: &mut Vec<PatternItem>) {
    if buf.is_empty() {
        return;
    }
    items.push(PatternItem::Literal(std::mem::take(buf)));
}

fn compile_token(letter: char, count: usize) -> Result<PatternItem, PatternError> {
    let item = match (letter, count) {
        ('y', 1) => PatternItem::Year(YearDigits::Plain),
        ('y', 2) => PatternItem::Year(YearDigits::Two),
        ('y', 4) => PatternItem::Year(YearDigits::Four),
        ('M', 1) => PatternItem::MonthNumber { padded: false },
        ('M', 2) => PatternItem::MonthNumber { padded: true },
        ('M', 3) => PatternItem::MonthName(NameForm::Abbreviated),
        ('M', 4) => PatternItem::MonthName(NameForm::Full),
        ('d', 1) => PatternItem::DayOfMonth { padded: false },
        ('d', 2) => PatternItem::DayOfMonth { padded: true },
        ('E', 1..=3) => PatternItem::WeekdayName(NameForm::Abbreviated),
        ('E', 4) => PatternItem::WeekdayName(NameForm::Full),
        ('H', 1) => PatternItem::Hour24 { padded: false },
        ('H', 2) => PatternItem::Hour24 { padded: true },
        ('h', 1) => PatternItem::Hour12 { padded: false },
        ('h', 2) => PatternItem::Hour12 { padded: true },
        ('m', 1) => PatternItem::Minute { padded: false },
        ('m', 2) => PatternItem::Minute { padded: true },
        ('s', 1) => PatternItem::Second { padded: false },
        ('s', 2) => PatternItem::Second { padded: true },
        ('a', 1) => PatternItem::DayPeriod,
        ('y' | 'M' | 'd' | 'E' | 'H' | 'h' | 'm' | 's' | 'a', _) => {
            return Err(PatternError::UnsupportedRun {
                token: letter.to_string().repeat(count),
            });
        }
        _ => return Err(PatternError::UnknownToken { letter }),
    };
    Ok(item)
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for DatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl Serialize for DatePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for DatePattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Self::compile(&source).map_err(serde::de::Error::custom)
    }
}
