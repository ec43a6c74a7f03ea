mod registry;

pub use registry::{
    get_locale, DateLocale, DE_DE, EN_GB, EN_US, ES_ES, FI_FI, FR_FR, SV_SE, ZH_CN,
};

use chrono::Weekday;
use thiserror::Error;

use crate::pattern::DatePattern;
use crate::Resolution;

/// Which form of a month or weekday name to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameForm {
    Full,
    Abbreviated,
}

/// Capability interface the rendering and parsing engines pull locale answers
/// through.
///
/// [`DateLocale`] implements this from bundled TSV tables. Embedders and tests
/// can substitute their own implementation to rename months or weekdays, or to
/// change the default patterns, without touching the engines.
pub trait DateSymbols {
    /// Canonical identifier, e.g. `"fi-FI"`.
    fn id(&self) -> &str;

    /// Name of `month` in the requested form.
    ///
    /// # Panics
    ///
    /// Implementations may panic when `month` is outside `1..=12`. Callers in
    /// this crate only pass values produced by [`crate::DateValue::month`].
    fn month_name(&self, month: u32, form: NameForm) -> &str;

    /// Name of `weekday` in the requested form.
    fn weekday_name(&self, weekday: Weekday, form: NameForm) -> &str;

    /// Day-period marker: the AM-equivalent when `pm` is false, the
    /// PM-equivalent otherwise.
    fn day_period(&self, pm: bool) -> &str;

    /// Default display pattern for `resolution`, used when the field has no
    /// custom pattern.
    fn default_pattern(&self, resolution: Resolution) -> &DatePattern;
}

/// Locale identifier that does not resolve to a bundled [`DateLocale`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale identifier {id:?}")]
pub struct UnknownLocaleError {
    pub id: String,
}

/// Like [`get_locale`], but keeps the rejected identifier in the error.
pub fn resolve_locale(id: &str) -> Result<&'static DateLocale, UnknownLocaleError> {
    get_locale(id).ok_or_else(|| UnknownLocaleError { id: id.to_string() })
}
