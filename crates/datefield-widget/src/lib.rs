//! Locale- and pattern-aware date field component.
//!
//! [`LocaleDateField`] composes the [`datefield_format`] engines with field
//! state: an optional value, the active [`Resolution`], the locale symbols,
//! an optional custom pattern, entry validation (range checks, leniency) and
//! value-change listeners. [`FieldSnapshot`] captures the whole configuration
//! as plain serializable data.

mod events;
mod field;
mod snapshot;

pub use crate::events::{ListenerId, ValueChange};
pub use crate::field::{InputRejected, LocaleDateField, RangeError};
pub use crate::snapshot::{FieldSnapshot, SnapshotError};

// The format-side types a field embedder works with, re-exported so most
// users depend on this crate alone.
pub use datefield_format::{
    DateField, DateParseError, DatePattern, DateSymbols, DateValue, NameForm, PatternError,
    Resolution, UnknownLocaleError, Weekday,
};
