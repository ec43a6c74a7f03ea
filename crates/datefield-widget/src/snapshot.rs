use datefield_format::{DateValue, PatternError, Resolution, UnknownLocaleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::{LocaleDateField, RangeError};

fn default_locale_id() -> String {
    "en-US".to_string()
}

/// Serializable description of a [`LocaleDateField`]: value plus display
/// configuration. Listeners are runtime-only and never part of a snapshot.
///
/// Every field is optional on the wire; a missing field falls back to the
/// same default a freshly constructed field has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DateValue>,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default = "default_locale_id")]
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default)]
    pub lenient: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_start: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_end: Option<DateValue>,
}

/// Why a [`FieldSnapshot`] could not be turned back into a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Locale(#[from] UnknownLocaleError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl LocaleDateField {
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            value: self.value(),
            resolution: self.resolution(),
            locale: self.locale_id().to_string(),
            format_pattern: self.date_format().map(str::to_string),
            caption: self.caption().map(str::to_string),
            width: self.width().map(str::to_string),
            lenient: self.lenient(),
            range_start: self.range_start(),
            range_end: self.range_end(),
        }
    }

    /// Rebuild a field from a snapshot. The locale, pattern and range go
    /// through the same validation as the setters; the value is restored
    /// as-is, since the range only gates entered text. The result has no
    /// listeners.
    pub fn from_snapshot(snapshot: &FieldSnapshot) -> Result<Self, SnapshotError> {
        let mut field = Self::new(snapshot.resolution);
        field.set_locale(&snapshot.locale)?;
        field.set_date_format(snapshot.format_pattern.as_deref())?;
        field.set_range(snapshot.range_start, snapshot.range_end)?;
        if let Some(caption) = &snapshot.caption {
            field.set_caption(caption.clone());
        }
        if let Some(width) = &snapshot.width {
            field.set_width(width.clone());
        }
        field.set_lenient(snapshot.lenient);
        field.set_value(snapshot.value);
        Ok(field)
    }
}
