use std::fmt;

use chrono::{Days, Duration, NaiveDate, NaiveTime, Weekday};
use thiserror::Error;

use crate::locale::{DateSymbols, NameForm};
use crate::pattern::{DatePattern, PatternItem, YearDigits};
use crate::{DateValue, Resolution};

/// Which date/time component a parse error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Weekday,
    DayPeriod,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateField::Year => "year",
            DateField::Month => "month",
            DateField::Day => "day",
            DateField::Hour => "hour",
            DateField::Minute => "minute",
            DateField::Second => "second",
            DateField::Weekday => "weekday",
            DateField::DayPeriod => "day period",
        })
    }
}

/// Input text rejected against a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("empty input")]
    Empty,
    #[error("expected literal {expected:?} at byte {index}")]
    LiteralMismatch { expected: String, index: usize },
    #[error("expected {expected} digit(s) for {field} at byte {index}")]
    MissingDigits {
        field: DateField,
        expected: usize,
        index: usize,
    },
    #[error("unknown {field} name {name:?} for locale {locale}")]
    UnknownName {
        field: DateField,
        name: String,
        locale: String,
    },
    #[error("{field} value {value} is out of range")]
    ComponentOutOfRange { field: DateField, value: i64 },
    #[error("no such calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i64, month: u32, day: u32 },
    #[error("weekday name {name:?} does not match the parsed date")]
    WeekdayMismatch { name: String },
    #[error("unexpected trailing input {rest:?}")]
    TrailingInput { rest: String },
}

/// Parse `input` against `pattern`, resolving name tokens through `symbols`.
///
/// Surrounding whitespace is trimmed; everything else must match the pattern
/// token for token, and leftover text is an error. Components the pattern
/// never mentions default to the epoch (`1970-01-01 00:00:00`). Weekday
/// tokens never pick the date; in strict mode they are cross-checked against
/// the parsed date, in lenient mode they are accepted as written.
///
/// Lenient mode also normalizes out-of-range components arithmetically
/// (month `13` rolls into January of the next year, `Feb 30` becomes
/// `Mar 2`), logging a warning; strict mode rejects them.
pub fn parse_date(
    input: &str,
    pattern: &DatePattern,
    symbols: &dyn DateSymbols,
    lenient: bool,
) -> Result<DateValue, DateParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    let mut cursor = Cursor {
        input: trimmed,
        rest: trimmed,
    };
    let mut fields = Fields::default();

    for item in pattern.items() {
        match item {
            PatternItem::Year(YearDigits::Plain) => {
                fields.year = Some(cursor.take_digits(1, 4, DateField::Year)?);
            }
            PatternItem::Year(YearDigits::Two) => {
                let value = cursor.take_exact_digits(2, DateField::Year)?;
                // Fixed 1970-2069 window, independent of the current clock.
                fields.year = Some(if value < 70 { 2000 + value } else { 1900 + value });
            }
            PatternItem::Year(YearDigits::Four) => {
                fields.year = Some(cursor.take_exact_digits(4, DateField::Year)?);
            }
            PatternItem::MonthNumber { padded } => {
                fields.month = Some(cursor.take_number(*padded, DateField::Month)?);
            }
            PatternItem::MonthName(_) => {
                let (month, _) = cursor.take_month_name(symbols)?;
                fields.month = Some(i64::from(month));
            }
            PatternItem::DayOfMonth { padded } => {
                fields.day = Some(cursor.take_number(*padded, DateField::Day)?);
            }
            PatternItem::WeekdayName(_) => {
                fields.weekday = Some(cursor.take_weekday_name(symbols)?);
            }
            PatternItem::Hour24 { padded } => {
                fields.hour24 = Some(cursor.take_number(*padded, DateField::Hour)?);
            }
            PatternItem::Hour12 { padded } => {
                fields.hour12 = Some(cursor.take_number(*padded, DateField::Hour)?);
            }
            PatternItem::Minute { padded } => {
                fields.minute = Some(cursor.take_number(*padded, DateField::Minute)?);
            }
            PatternItem::Second { padded } => {
                fields.second = Some(cursor.take_number(*padded, DateField::Second)?);
            }
            PatternItem::DayPeriod => {
                fields.pm = Some(cursor.take_day_period(symbols)?);
            }
            PatternItem::Literal(text) => cursor.take_literal(text)?,
        }
    }

    if !cursor.rest.is_empty() {
        return Err(DateParseError::TrailingInput {
            rest: cursor.rest.to_string(),
        });
    }

    assemble(fields, lenient)
}

/// Parse `input` the way a date field reads it back: against the custom
/// pattern when one is set, otherwise the locale default for `resolution`.
pub fn parse_display(
    input: &str,
    resolution: Resolution,
    custom: Option<&DatePattern>,
    symbols: &dyn DateSymbols,
    lenient: bool,
) -> Result<DateValue, DateParseError> {
    let pattern = custom.unwrap_or_else(|| symbols.default_pattern(resolution));
    parse_date(input, pattern, symbols, lenient)
}

#[derive(Default)]
struct Fields {
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    hour24: Option<i64>,
    hour12: Option<i64>,
    pm: Option<bool>,
    minute: Option<i64>,
    second: Option<i64>,
    weekday: Option<(Weekday, String)>,
}

struct Cursor<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn index(&self) -> usize {
        self.input.len() - self.rest.len()
    }

    /// Exactly `count` digits for zero-padded tokens.
    fn take_exact_digits(&mut self, count: usize, field: DateField) -> Result<i64, DateParseError> {
        let available = leading_digits(self.rest);
        if available < count {
            return Err(DateParseError::MissingDigits {
                field,
                expected: count,
                index: self.index(),
            });
        }
        Ok(self.consume_digits(count))
    }

    /// Greedy run of `min..=max` digits for unpadded tokens.
    fn take_digits(
        &mut self,
        min: usize,
        max: usize,
        field: DateField,
    ) -> Result<i64, DateParseError> {
        let available = leading_digits(self.rest);
        if available < min {
            return Err(DateParseError::MissingDigits {
                field,
                expected: min,
                index: self.index(),
            });
        }
        Ok(self.consume_digits(available.min(max)))
    }

    fn take_number(&mut self, padded: bool, field: DateField) -> Result<i64, DateParseError> {
        if padded {
            self.take_exact_digits(2, field)
        } else {
            self.take_digits(1, 2, field)
        }
    }

    fn consume_digits(&mut self, count: usize) -> i64 {
        // Only called after `leading_digits` guaranteed `count` ASCII digits,
        // so the split lands on a char boundary.
        let (digits, rest) = self.rest.split_at(count);
        self.rest = rest;
        digits
            .bytes()
            .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'))
    }

    fn take_literal(&mut self, expected: &str) -> Result<(), DateParseError> {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(DateParseError::LiteralMismatch {
                expected: expected.to_string(),
                index: self.index(),
            }),
        }
    }

    fn take_month_name(
        &mut self,
        symbols: &dyn DateSymbols,
    ) -> Result<(u32, String), DateParseError> {
        let mut candidates = Vec::with_capacity(24);
        for month in 1..=12 {
            for form in [NameForm::Full, NameForm::Abbreviated] {
                candidates.push((month, symbols.month_name(month, form).to_string()));
            }
        }
        self.take_name(candidates, DateField::Month, symbols)
    }

    fn take_weekday_name(
        &mut self,
        symbols: &dyn DateSymbols,
    ) -> Result<(Weekday, String), DateParseError> {
        const WEEKDAYS: [Weekday; 7] = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        let mut candidates = Vec::with_capacity(14);
        for weekday in WEEKDAYS {
            for form in [NameForm::Full, NameForm::Abbreviated] {
                candidates.push((weekday, symbols.weekday_name(weekday, form).to_string()));
            }
        }
        self.take_name(candidates, DateField::Weekday, symbols)
    }

    fn take_day_period(&mut self, symbols: &dyn DateSymbols) -> Result<bool, DateParseError> {
        let candidates = vec![
            (false, symbols.day_period(false).to_string()),
            (true, symbols.day_period(true).to_string()),
        ];
        self.take_name(candidates, DateField::DayPeriod, symbols)
            .map(|(pm, _)| pm)
    }

    /// Match one of `candidates` at the cursor, case-insensitively. Either
    /// name form is accepted regardless of the token's form.
    fn take_name<T: Copy>(
        &mut self,
        mut candidates: Vec<(T, String)>,
        field: DateField,
        symbols: &dyn DateSymbols,
    ) -> Result<(T, String), DateParseError> {
        // Longest name first, so a short name cannot shadow a longer one that
        // shares its prefix ("mar" / "marzo").
        candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        for (value, name) in candidates {
            if let Some(rest) = strip_prefix_ignore_case(self.rest, &name) {
                self.rest = rest;
                return Ok((value, name));
            }
        }
        Err(DateParseError::UnknownName {
            field,
            name: leading_word(self.rest),
            locale: symbols.id().to_string(),
        })
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_digit()).count()
}

fn strip_prefix_ignore_case<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = input;
    for expected in name.chars() {
        let mut chars = rest.chars();
        let actual = chars.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// For `UnknownName` payloads: the word the cursor is stuck on.
fn leading_word(rest: &str) -> String {
    let word: String = rest.chars().take_while(|ch| ch.is_alphanumeric()).collect();
    if word.is_empty() {
        rest.chars().take(8).collect()
    } else {
        word
    }
}

fn assemble(fields: Fields, lenient: bool) -> Result<DateValue, DateParseError> {
    let year = fields.year.unwrap_or(1970);
    let month = fields.month.unwrap_or(1);
    let day = fields.day.unwrap_or(1);
    let hour = match (fields.hour24, fields.hour12) {
        (Some(hour), _) => hour,
        (None, Some(hour12)) => {
            if !lenient && !(1..=12).contains(&hour12) {
                return Err(DateParseError::ComponentOutOfRange {
                    field: DateField::Hour,
                    value: hour12,
                });
            }
            // 12 AM is hour 0; 12 PM is hour 12.
            hour12.rem_euclid(12) + if fields.pm.unwrap_or(false) { 12 } else { 0 }
        }
        (None, None) => 0,
    };
    let minute = fields.minute.unwrap_or(0);
    let second = fields.second.unwrap_or(0);

    let value = if lenient {
        assemble_lenient(year, month, day, hour, minute, second)?
    } else {
        assemble_strict(year, month, day, hour, minute, second)?
    };

    if let Some((weekday, name)) = fields.weekday {
        if !lenient && value.weekday() != weekday {
            return Err(DateParseError::WeekdayMismatch { name });
        }
    }
    Ok(value)
}

fn check_range(field: DateField, value: i64, min: i64, max: i64) -> Result<(), DateParseError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DateParseError::ComponentOutOfRange { field, value })
    }
}

fn assemble_strict(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Result<DateValue, DateParseError> {
    check_range(DateField::Month, month, 1, 12)?;
    check_range(DateField::Day, day, 1, 31)?;
    check_range(DateField::Hour, hour, 0, 23)?;
    check_range(DateField::Minute, minute, 0, 59)?;
    check_range(DateField::Second, second, 0, 59)?;
    let year32 = i32::try_from(year).map_err(|_| DateParseError::ComponentOutOfRange {
        field: DateField::Year,
        value: year,
    })?;
    DateValue::from_ymd_hms(
        year32,
        month as u32,
        day as u32,
        hour as u32,
        minute as u32,
        second as u32,
    )
    .map_err(|_| DateParseError::InvalidDate {
        year,
        month: month as u32,
        day: day as u32,
    })
}

fn assemble_lenient(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Result<DateValue, DateParseError> {
    // Components that already form a real date need no adjustment.
    if let Ok(value) = assemble_strict(year, month, day, hour, minute, second) {
        return Ok(value);
    }

    let (norm_year, norm_month) = normalize_year_month(year, month);
    let year32 = i32::try_from(norm_year).map_err(|_| DateParseError::ComponentOutOfRange {
        field: DateField::Year,
        value: norm_year,
    })?;
    let first_of_month =
        NaiveDate::from_ymd_opt(year32, norm_month as u32, 1).ok_or(
            DateParseError::ComponentOutOfRange {
                field: DateField::Year,
                value: norm_year,
            },
        )?;

    // Day and time overflow roll over arithmetically: Feb 30 -> Mar 2,
    // 25:00 -> 01:00 the next day.
    let day_offset = day - 1;
    let date = if day_offset >= 0 {
        first_of_month.checked_add_days(Days::new(day_offset as u64))
    } else {
        first_of_month.checked_sub_days(Days::new(day_offset.unsigned_abs()))
    }
    .ok_or(DateParseError::ComponentOutOfRange {
        field: DateField::Day,
        value: day,
    })?;

    let clock_seconds = hour * 3600 + minute * 60 + second;
    let value = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::seconds(clock_seconds))
        .map(DateValue::from)
        .ok_or(DateParseError::ComponentOutOfRange {
            field: DateField::Hour,
            value: hour,
        })?;

    log::warn!(
        "lenient date normalization: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} -> {value}"
    );
    Ok(value)
}

fn normalize_year_month(year: i64, month: i64) -> (i64, i64) {
    let total_months = year * 12 + (month - 1);
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) + 1;
    (new_year, new_month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{EN_US, FI_FI};
    use pretty_assertions::assert_eq;

    fn pattern(source: &str) -> DatePattern {
        DatePattern::compile(source).unwrap()
    }

    #[test]
    fn case_insensitive_prefix_handles_non_ascii() {
        assert_eq!(strip_prefix_ignore_case("MÄRZ 2014", "März"), Some(" 2014"));
        assert_eq!(strip_prefix_ignore_case("heinäkuu", "HEINÄKUU"), Some(""));
        assert_eq!(strip_prefix_ignore_case("Mai", "März"), None);
    }

    #[test]
    fn unpadded_tokens_take_greedy_digit_runs() {
        let p = pattern("d.M.yyyy");
        assert_eq!(
            parse_date("2.7.2013", &p, &FI_FI, false).unwrap(),
            DateValue::from_ymd(2013, 7, 2).unwrap()
        );
        assert_eq!(
            parse_date("27.7.2013", &p, &FI_FI, false).unwrap(),
            DateValue::from_ymd(2013, 7, 27).unwrap()
        );
    }

    #[test]
    fn padded_tokens_require_exact_width() {
        let p = pattern("dd/MM/yyyy");
        assert_eq!(
            parse_date("4/03/2014", &p, &EN_US, false).unwrap_err(),
            DateParseError::MissingDigits {
                field: DateField::Day,
                expected: 2,
                index: 0,
            }
        );
        assert_eq!(
            parse_date("04/03/14", &p, &EN_US, false).unwrap_err(),
            DateParseError::MissingDigits {
                field: DateField::Year,
                expected: 4,
                index: 6,
            }
        );
    }

    #[test]
    fn two_digit_years_use_a_fixed_window() {
        let p = pattern("dd/MM/yy");
        let parse_year = |input: &str| parse_date(input, &p, &EN_US, false).unwrap().year();
        assert_eq!(parse_year("01/01/14"), 2014);
        assert_eq!(parse_year("01/01/69"), 2069);
        assert_eq!(parse_year("01/01/70"), 1970);
        assert_eq!(parse_year("01/01/95"), 1995);
    }

    #[test]
    fn missing_components_default_to_the_epoch() {
        let p = pattern("dd/MM");
        assert_eq!(
            parse_date("14/03", &p, &EN_US, false).unwrap(),
            DateValue::from_ymd(1970, 3, 14).unwrap()
        );
        let time_only = pattern("HH:mm");
        assert_eq!(
            parse_date("06:30", &time_only, &EN_US, false).unwrap(),
            DateValue::from_ymd_hms(1970, 1, 1, 6, 30, 0).unwrap()
        );
    }

    #[test]
    fn normalize_year_month_wraps_both_directions() {
        assert_eq!(normalize_year_month(2014, 13), (2015, 1));
        assert_eq!(normalize_year_month(2014, 0), (2013, 12));
        assert_eq!(normalize_year_month(2014, 25), (2016, 1));
        assert_eq!(normalize_year_month(2014, 6), (2014, 6));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let p = pattern("d.M.yyyy");
        assert_eq!(
            parse_date("  27.7.2013  ", &p, &FI_FI, false).unwrap(),
            DateValue::from_ymd(2013, 7, 27).unwrap()
        );
    }
}
