//! Locale- and pattern-aware date formatting and parsing.
//!
//! This crate is the engine half of a date field:
//! - [`DateValue`] and [`Resolution`]: the value model (a full date/time plus
//!   the granularity a field exposes).
//! - [`DatePattern`]: the `dd/MM/yyyy EEE` token grammar, compiled eagerly so
//!   bad patterns are rejected before they are ever stored.
//! - [`locale`]: bundled locale symbol tables behind the [`DateSymbols`]
//!   capability trait.
//! - [`render_display`] / [`parse_display`]: the display contract a field
//!   uses (custom pattern wins, otherwise the locale default for the active
//!   resolution; the value is truncated at that resolution).

pub mod locale;

mod parse;
mod pattern;
mod render;
mod resolution;
mod value;

/// Re-exported because [`DateSymbols::weekday_name`] and
/// [`DateValue::weekday`] speak in terms of it.
pub use chrono::Weekday;

pub use crate::locale::{
    get_locale, resolve_locale, DateLocale, DateSymbols, NameForm, UnknownLocaleError,
};
pub use crate::parse::{parse_date, parse_display, DateField, DateParseError};
pub use crate::pattern::{DatePattern, PatternError};
pub use crate::render::{format_date, render_display};
pub use crate::resolution::Resolution;
pub use crate::value::{DateValue, OutOfRangeError};
