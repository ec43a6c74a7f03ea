use crate::locale::DateSymbols;
use crate::pattern::{DatePattern, PatternItem, YearDigits};
use crate::{DateValue, Resolution};

/// Render `value` through `pattern`, resolving name and day-period tokens
/// against `symbols`.
///
/// Rendering cannot fail: [`DatePattern::compile`] has already rejected
/// anything this function would not know how to emit.
pub fn format_date(value: DateValue, pattern: &DatePattern, symbols: &dyn DateSymbols) -> String {
    let mut out = String::with_capacity(pattern.as_str().len() + 8);
    for item in pattern.items() {
        match item {
            PatternItem::Year(digits) => match digits {
                YearDigits::Plain => out.push_str(&value.year().to_string()),
                YearDigits::Two => {
                    out.push_str(&format!("{:02}", value.year().rem_euclid(100)));
                }
                YearDigits::Four => out.push_str(&format!("{:04}", value.year())),
            },
            PatternItem::MonthNumber { padded } => push_num(&mut out, value.month(), *padded),
            PatternItem::MonthName(form) => {
                out.push_str(symbols.month_name(value.month(), *form));
            }
            PatternItem::DayOfMonth { padded } => push_num(&mut out, value.day(), *padded),
            PatternItem::WeekdayName(form) => {
                out.push_str(symbols.weekday_name(value.weekday(), *form));
            }
            PatternItem::Hour24 { padded } => push_num(&mut out, value.hour(), *padded),
            PatternItem::Hour12 { padded } => {
                let hour = match value.hour() % 12 {
                    0 => 12,
                    hour => hour,
                };
                push_num(&mut out, hour, *padded);
            }
            PatternItem::Minute { padded } => push_num(&mut out, value.minute(), *padded),
            PatternItem::Second { padded } => push_num(&mut out, value.second(), *padded),
            PatternItem::DayPeriod => out.push_str(symbols.day_period(value.hour() >= 12)),
            PatternItem::Literal(text) => out.push_str(text),
        }
    }
    out
}

/// Display-format `value` the way a date field shows it: use `custom` when
/// set, otherwise the locale default pattern for `resolution`, and truncate
/// the value at `resolution` first so finer components cannot leak into the
/// output.
pub fn render_display(
    value: DateValue,
    resolution: Resolution,
    custom: Option<&DatePattern>,
    symbols: &dyn DateSymbols,
) -> String {
    let pattern = custom.unwrap_or_else(|| symbols.default_pattern(resolution));
    format_date(value.truncated_to(resolution), pattern, symbols)
}

fn push_num(out: &mut String, value: u32, padded: bool) {
    if padded {
        out.push_str(&format!("{value:02}"));
    } else {
        out.push_str(&format!("{value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::EN_US;
    use pretty_assertions::assert_eq;

    fn pattern(source: &str) -> DatePattern {
        DatePattern::compile(source).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> DateValue {
        DateValue::from_ymd(year, month, day).unwrap()
    }

    fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateValue {
        DateValue::from_ymd_hms(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn pads_only_doubled_tokens() {
        let value = date(2013, 7, 5);
        assert_eq!(format_date(value, &pattern("d/M/y"), &EN_US), "5/7/2013");
        assert_eq!(format_date(value, &pattern("dd/MM/yyyy"), &EN_US), "05/07/2013");
    }

    #[test]
    fn two_digit_year_keeps_last_two_digits() {
        assert_eq!(format_date(date(2014, 3, 14), &pattern("yy"), &EN_US), "14");
        assert_eq!(format_date(date(2009, 1, 1), &pattern("yy"), &EN_US), "09");
        assert_eq!(format_date(date(1970, 1, 1), &pattern("yy"), &EN_US), "70");
    }

    #[test]
    fn twelve_hour_clock_wraps_midnight_and_noon() {
        let midnight = datetime(2014, 3, 14, 0, 5, 0);
        let noon = datetime(2014, 3, 14, 12, 5, 0);
        let evening = datetime(2014, 3, 14, 18, 5, 0);
        assert_eq!(format_date(midnight, &pattern("h:mm a"), &EN_US), "12:05 AM");
        assert_eq!(format_date(noon, &pattern("h:mm a"), &EN_US), "12:05 PM");
        assert_eq!(format_date(evening, &pattern("h:mm a"), &EN_US), "6:05 PM");
        assert_eq!(format_date(evening, &pattern("HH:mm"), &EN_US), "18:05");
    }

    #[test]
    fn name_tokens_resolve_through_symbols() {
        let value = date(2014, 3, 14);
        assert_eq!(format_date(value, &pattern("MMM"), &EN_US), "Mar");
        assert_eq!(format_date(value, &pattern("MMMM"), &EN_US), "March");
        assert_eq!(format_date(value, &pattern("EEE"), &EN_US), "Fri");
        assert_eq!(format_date(value, &pattern("EEEE"), &EN_US), "Friday");
    }

    #[test]
    fn quoted_literals_pass_through() {
        let value = date(2014, 3, 14);
        assert_eq!(
            format_date(value, &pattern("EEEE 'the' d"), &EN_US),
            "Friday the 14"
        );
        assert_eq!(
            format_date(value, &pattern("d 'o''clock'"), &EN_US),
            "14 o'clock"
        );
    }

    #[test]
    fn render_display_prefers_custom_pattern() {
        let value = date(2014, 3, 14);
        assert_eq!(render_display(value, Resolution::Day, None, &EN_US), "3/14/2014");
        let custom = pattern("dd/MM/yyyy EEE");
        assert_eq!(
            render_display(value, Resolution::Day, Some(&custom), &EN_US),
            "14/03/2014 Fri"
        );
    }

    #[test]
    fn render_display_truncates_at_resolution() {
        let value = datetime(2013, 7, 27, 14, 31, 55);
        assert_eq!(render_display(value, Resolution::Year, None, &EN_US), "2013");
        assert_eq!(render_display(value, Resolution::Month, None, &EN_US), "7/2013");
        assert_eq!(render_display(value, Resolution::Day, None, &EN_US), "7/27/2013");
        // A custom pattern with time tokens still renders the truncated value.
        let custom = pattern("dd/MM/yyyy HH:mm:ss");
        assert_eq!(
            render_display(value, Resolution::Day, Some(&custom), &EN_US),
            "27/07/2013 00:00:00"
        );
    }
}
