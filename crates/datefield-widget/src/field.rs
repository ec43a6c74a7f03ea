use std::fmt;

use datefield_format::locale::EN_US;
use datefield_format::{
    parse_display, render_display, resolve_locale, DateParseError, DatePattern, DateSymbols,
    DateValue, PatternError, Resolution, UnknownLocaleError,
};
use thiserror::Error;

use crate::events::{ListenerId, ListenerSet, ValueChange};

/// Bounds passed to [`LocaleDateField::set_range`] are inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("range start is after range end")]
pub struct RangeError;

/// Why [`LocaleDateField::apply_input`] rejected the entered text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error(transparent)]
    Parse(#[from] DateParseError),
    #[error("date is before the start of the allowed range")]
    BeforeRangeStart,
    #[error("date is after the end of the allowed range")]
    AfterRangeEnd,
}

/// A locale- and pattern-aware date field.
///
/// The field owns the value and the display configuration; rendering and
/// parsing are delegated to [`datefield_format`]. Locale answers come through
/// the [`DateSymbols`] capability, so swapping locale is swapping which
/// implementation the field points at; nothing else about the field changes.
///
/// Display contract: a custom pattern set with
/// [`set_date_format`](Self::set_date_format) always wins; otherwise the
/// locale's default pattern for the active [`Resolution`] is used. The stored
/// value always keeps full second precision, whatever the resolution.
///
/// # Examples
///
/// ```
/// use datefield_widget::{DateValue, LocaleDateField, Resolution};
///
/// let mut field = LocaleDateField::new(Resolution::Day);
/// field.set_date_format(Some("dd/MM/yyyy EEE")).unwrap();
/// field.set_value(Some(DateValue::from_ymd(2014, 3, 14).unwrap()));
/// assert_eq!(field.formatted_value(), "14/03/2014 Fri");
/// ```
pub struct LocaleDateField {
    value: Option<DateValue>,
    resolution: Resolution,
    symbols: &'static dyn DateSymbols,
    format: Option<DatePattern>,
    caption: Option<String>,
    width: Option<String>,
    lenient: bool,
    range_start: Option<DateValue>,
    range_end: Option<DateValue>,
    listeners: ListenerSet,
}

impl LocaleDateField {
    /// Empty field in the `en-US` locale with no custom pattern.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            value: None,
            resolution,
            symbols: &EN_US,
            format: None,
            caption: None,
            width: None,
            lenient: false,
            range_start: None,
            range_end: None,
            listeners: ListenerSet::default(),
        }
    }

    /// [`new`](Self::new), pre-populated with a value. Construction is not a
    /// change, so no event fires.
    pub fn with_value(resolution: Resolution, value: DateValue) -> Self {
        let mut field = Self::new(resolution);
        field.value = Some(value);
        field
    }

    pub fn value(&self) -> Option<DateValue> {
        self.value
    }

    /// Replace the value, firing value-change listeners when it actually
    /// changes. Values differing only below the active resolution still
    /// compare unequal here; the field stores full precision.
    pub fn set_value(&mut self, value: Option<DateValue>) {
        if self.value == value {
            return;
        }
        let event = ValueChange {
            previous: self.value,
            current: value,
        };
        self.value = value;
        self.listeners.fire(&event);
    }

    pub fn clear(&mut self) {
        self.set_value(None);
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Change the display granularity. The stored value is untouched; only
    /// rendering, parsing and range checks see the new resolution.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    /// Canonical identifier of the active locale, e.g. `"fi-FI"`.
    pub fn locale_id(&self) -> &str {
        self.symbols.id()
    }

    /// Switch to a bundled locale. Accepts the spellings
    /// [`resolve_locale`] accepts (`"fi-FI"`, `"fi_FI"`, `"fi"`, ...). On
    /// error the previous locale stays active.
    pub fn set_locale(&mut self, id: &str) -> Result<(), UnknownLocaleError> {
        self.symbols = resolve_locale(id)?;
        Ok(())
    }

    pub fn symbols(&self) -> &'static dyn DateSymbols {
        self.symbols
    }

    /// Point the field at a custom [`DateSymbols`] implementation.
    pub fn set_symbols(&mut self, symbols: &'static dyn DateSymbols) {
        self.symbols = symbols;
    }

    /// The custom pattern source, when one is set.
    pub fn date_format(&self) -> Option<&str> {
        self.format.as_ref().map(DatePattern::as_str)
    }

    /// Set or clear the custom display pattern. The pattern is compiled
    /// eagerly; a rejected pattern leaves the previous one in place.
    pub fn set_date_format(&mut self, pattern: Option<&str>) -> Result<(), PatternError> {
        self.format = match pattern {
            Some(source) => Some(DatePattern::compile(source)?),
            None => None,
        };
        Ok(())
    }

    /// Display text for the current value; the empty string when the field is
    /// empty.
    pub fn formatted_value(&self) -> String {
        match self.value {
            Some(value) => {
                render_display(value, self.resolution, self.format.as_ref(), self.symbols)
            }
            None => String::new(),
        }
    }

    /// Parse `input` under the field's display contract without touching the
    /// field.
    pub fn parse(&self, input: &str) -> Result<DateValue, DateParseError> {
        parse_display(
            input,
            self.resolution,
            self.format.as_ref(),
            self.symbols,
            self.lenient,
        )
    }

    /// Feed entered text into the field: blank input clears it, anything else
    /// is parsed and range-checked before becoming the value. On error the
    /// field keeps its previous value.
    pub fn apply_input(&mut self, input: &str) -> Result<(), InputRejected> {
        if input.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        let value = self.parse(input)?;
        self.check_range(value)?;
        self.set_value(Some(value));
        Ok(())
    }

    /// Restrict the values [`apply_input`](Self::apply_input) accepts. Bounds
    /// are inclusive and compared at the active resolution; `None` leaves
    /// that side open.
    pub fn set_range(
        &mut self,
        start: Option<DateValue>,
        end: Option<DateValue>,
    ) -> Result<(), RangeError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(RangeError);
            }
        }
        self.range_start = start;
        self.range_end = end;
        Ok(())
    }

    pub fn range_start(&self) -> Option<DateValue> {
        self.range_start
    }

    pub fn range_end(&self) -> Option<DateValue> {
        self.range_end
    }

    fn check_range(&self, value: DateValue) -> Result<(), InputRejected> {
        let value = value.truncated_to(self.resolution);
        if let Some(start) = self.range_start {
            if value < start.truncated_to(self.resolution) {
                return Err(InputRejected::BeforeRangeStart);
            }
        }
        if let Some(end) = self.range_end {
            if value > end.truncated_to(self.resolution) {
                return Err(InputRejected::AfterRangeEnd);
            }
        }
        Ok(())
    }

    /// Register a listener called (in registration order) whenever the value
    /// actually changes.
    pub fn on_value_change(&mut self, listener: impl FnMut(&ValueChange) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister a listener. Returns whether it was still registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    pub fn clear_caption(&mut self) {
        self.caption = None;
    }

    /// Layout width hint, e.g. `"200px"`. The field stores it verbatim.
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub fn set_width(&mut self, width: impl Into<String>) {
        self.width = Some(width.into());
    }

    pub fn clear_width(&mut self) {
        self.width = None;
    }

    pub fn lenient(&self) -> bool {
        self.lenient
    }

    /// In lenient mode out-of-range components entered by the user roll over
    /// arithmetically instead of being rejected; see
    /// [`datefield_format::parse_date`].
    pub fn set_lenient(&mut self, lenient: bool) {
        self.lenient = lenient;
    }
}

impl Default for LocaleDateField {
    fn default() -> Self {
        Self::new(Resolution::default())
    }
}

impl fmt::Debug for LocaleDateField {
    // Listeners are boxed closures; show the state that describes the field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleDateField")
            .field("value", &self.value)
            .field("resolution", &self.resolution)
            .field("locale", &self.symbols.id())
            .field("format", &self.date_format())
            .field("caption", &self.caption)
            .field("width", &self.width)
            .field("lenient", &self.lenient)
            .field("range_start", &self.range_start)
            .field("range_end", &self.range_end)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_field_is_empty_en_us() {
        let field = LocaleDateField::new(Resolution::Day);
        assert!(field.is_empty());
        assert_eq!(field.locale_id(), "en-US");
        assert_eq!(field.date_format(), None);
        assert_eq!(field.formatted_value(), "");
        assert!(!field.lenient());
    }

    #[test]
    fn default_resolution_is_day() {
        assert_eq!(LocaleDateField::default().resolution(), Resolution::Day);
    }

    #[test]
    fn range_bounds_are_compared_at_the_active_resolution() {
        let mut field = LocaleDateField::new(Resolution::Day);
        let day = DateValue::from_ymd(2014, 3, 14).unwrap();
        let evening = DateValue::from_ymd_hms(2014, 3, 14, 21, 0, 0).unwrap();
        field.set_range(Some(evening), Some(evening)).unwrap();

        // Same day as both bounds, so in range even though the time of day
        // is outside them.
        field.apply_input("3/14/2014").unwrap();
        assert_eq!(field.value(), Some(day));

        assert_eq!(
            field.apply_input("3/15/2014"),
            Err(InputRejected::AfterRangeEnd)
        );
        assert_eq!(
            field.apply_input("3/13/2014"),
            Err(InputRejected::BeforeRangeStart)
        );
        assert_eq!(field.value(), Some(day));
    }

    #[test]
    fn set_range_rejects_inverted_bounds() {
        let mut field = LocaleDateField::new(Resolution::Day);
        let start = DateValue::from_ymd(2014, 3, 15).unwrap();
        let end = DateValue::from_ymd(2014, 3, 14).unwrap();
        assert_eq!(field.set_range(Some(start), Some(end)), Err(RangeError));
        assert_eq!(field.range_start(), None);
        assert_eq!(field.range_end(), None);
    }

    #[test]
    fn debug_output_names_the_locale_and_pattern() {
        let mut field = LocaleDateField::new(Resolution::Day);
        field.set_locale("fi-FI").unwrap();
        field.set_date_format(Some("dd/MM/yyyy")).unwrap();
        let debug = format!("{field:?}");
        assert!(debug.contains("\"fi-FI\""), "{debug}");
        assert!(debug.contains("\"dd/MM/yyyy\""), "{debug}");
    }
}
