use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::Weekday;

use super::{DateSymbols, NameForm};
use crate::pattern::DatePattern;
use crate::Resolution;

/// Parsed symbol tables for one locale.
#[derive(Debug)]
struct SymbolTable {
    month_full: [String; 12],
    month_abbrev: [String; 12],
    /// Monday-first (ISO-8601 day numbering).
    weekday_full: [String; 7],
    weekday_abbrev: [String; 7],
    period_am: String,
    period_pm: String,
    /// Indexed in [`Resolution`] declaration order, coarse to fine.
    default_patterns: [DatePattern; 6],
}

/// One bundled locale: identifier plus name tables and default patterns.
///
/// Data is stored outside the Rust source in simple TSV files under
/// `src/locale/data/`. See `src/locale/data/README.md` for the format and the
/// key set every file must provide. The TSV is parsed once on first use;
/// malformed or incomplete data panics with the offending line so broken
/// tables cannot ship silently.
#[derive(Debug)]
pub struct DateLocale {
    id: &'static str,
    data_tsv: &'static str,
    table: OnceLock<SymbolTable>,
}

impl DateLocale {
    const fn new(id: &'static str, data_tsv: &'static str) -> Self {
        Self {
            id,
            data_tsv,
            table: OnceLock::new(),
        }
    }

    fn table(&self) -> &SymbolTable {
        self.table
            .get_or_init(|| parse_symbol_tsv(self.id, self.data_tsv))
    }
}

impl DateSymbols for DateLocale {
    fn id(&self) -> &str {
        self.id
    }

    fn month_name(&self, month: u32, form: NameForm) -> &str {
        assert!(
            (1..=12).contains(&month),
            "month {month} outside 1..=12 for locale {}",
            self.id
        );
        let table = self.table();
        let idx = (month - 1) as usize;
        match form {
            NameForm::Full => &table.month_full[idx],
            NameForm::Abbreviated => &table.month_abbrev[idx],
        }
    }

    fn weekday_name(&self, weekday: Weekday, form: NameForm) -> &str {
        let table = self.table();
        let idx = weekday.num_days_from_monday() as usize;
        match form {
            NameForm::Full => &table.weekday_full[idx],
            NameForm::Abbreviated => &table.weekday_abbrev[idx],
        }
    }

    fn day_period(&self, pm: bool) -> &str {
        let table = self.table();
        if pm {
            &table.period_pm
        } else {
            &table.period_am
        }
    }

    fn default_pattern(&self, resolution: Resolution) -> &DatePattern {
        // The array is laid out in declaration order, so the discriminant is
        // the index.
        &self.table().default_patterns[resolution as usize]
    }
}

fn parse_symbol_tsv(id: &str, data_tsv: &'static str) -> SymbolTable {
    let mut values: HashMap<&'static str, &'static str> = HashMap::new();
    // Track the exact line that introduced each key so we can produce
    // actionable diagnostics if the TSV contains duplicate entries.
    let mut first_line: HashMap<&'static str, (usize, &'static str)> = HashMap::new();

    for (idx, raw_line) in data_tsv.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('\t').unwrap_or_else(|| {
            panic!("invalid {id} symbol line (expected TSV) at line {line_no}: {line:?}")
        });
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            panic!("invalid {id} symbol line (empty entry) at line {line_no}: {line:?}");
        }

        if let Some((prev_no, prev_line)) = first_line.get(key) {
            panic!(
                "duplicate {id} symbol key {key:?}\n  first: line {prev_no}: {prev_line:?}\n  second: line {line_no}: {line:?}"
            );
        }
        first_line.insert(key, (line_no, line));
        values.insert(key, value);
    }

    let require = |key: &str| -> &'static str {
        values
            .get(key)
            .copied()
            .unwrap_or_else(|| panic!("locale {id} is missing symbol key {key:?}"))
    };
    let compile = |key: &str| -> DatePattern {
        let source = require(key);
        DatePattern::compile(source).unwrap_or_else(|err| {
            panic!("locale {id} default pattern {key:?} ({source:?}) does not compile: {err}")
        })
    };

    SymbolTable {
        month_full: std::array::from_fn(|i| require(&format!("month.full.{}", i + 1)).to_string()),
        month_abbrev: std::array::from_fn(|i| {
            require(&format!("month.abbrev.{}", i + 1)).to_string()
        }),
        // Weekday keys use ISO-8601 numbering: 1 = Monday .. 7 = Sunday.
        weekday_full: std::array::from_fn(|i| {
            require(&format!("weekday.full.{}", i + 1)).to_string()
        }),
        weekday_abbrev: std::array::from_fn(|i| {
            require(&format!("weekday.abbrev.{}", i + 1)).to_string()
        }),
        period_am: require("period.am").to_string(),
        period_pm: require("period.pm").to_string(),
        default_patterns: [
            compile("pattern.year"),
            compile("pattern.month"),
            compile("pattern.day"),
            compile("pattern.hour"),
            compile("pattern.minute"),
            compile("pattern.second"),
        ],
    }
}

// Locale TSVs live in `src/locale/data/`. See `src/locale/data/README.md` for
// contributor docs (format and required keys).
pub static EN_US: DateLocale = DateLocale::new("en-US", include_str!("data/en-US.tsv"));
pub static EN_GB: DateLocale = DateLocale::new("en-GB", include_str!("data/en-GB.tsv"));
pub static FI_FI: DateLocale = DateLocale::new("fi-FI", include_str!("data/fi-FI.tsv"));
pub static ZH_CN: DateLocale = DateLocale::new("zh-CN", include_str!("data/zh-CN.tsv"));
pub static DE_DE: DateLocale = DateLocale::new("de-DE", include_str!("data/de-DE.tsv"));
pub static FR_FR: DateLocale = DateLocale::new("fr-FR", include_str!("data/fr-FR.tsv"));
pub static ES_ES: DateLocale = DateLocale::new("es-ES", include_str!("data/es-ES.tsv"));
pub static SV_SE: DateLocale = DateLocale::new("sv-SE", include_str!("data/sv-SE.tsv"));

fn normalize_locale_id(id: &str) -> Option<&'static str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Normalize common locale tag spellings:
    // - treat `-` and `_` as equivalent
    // - match case-insensitively
    let mut key = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        let ch = match ch {
            '_' => '-',
            other => other,
        };
        key.push(ch.to_ascii_lowercase());
    }

    // Handle POSIX locale tags like `fi_FI.UTF-8` or `de_DE@euro` by dropping
    // the encoding / modifier suffix.
    if let Some(idx) = key.find('.') {
        key.truncate(idx);
    }
    if let Some(idx) = key.find('@') {
        key.truncate(idx);
    }

    // Drop BCP-47 extensions (`en-US-u-ca-gregory`, `fr-FR-x-private`, ...).
    // Only the language/region portion matters here.
    if let Some(idx) = key.find("-u-") {
        key.truncate(idx);
    }
    if let Some(idx) = key.find("-x-") {
        key.truncate(idx);
    }

    match key.as_str() {
        "en-us" | "en" => Some("en-US"),
        "en-gb" | "en-uk" => Some("en-GB"),
        "fi-fi" | "fi" => Some("fi-FI"),
        "zh-cn" | "zh" => Some("zh-CN"),
        "de-de" | "de" => Some("de-DE"),
        "fr-fr" | "fr" => Some("fr-FR"),
        "es-es" | "es" => Some("es-ES"),
        "sv-se" | "sv" => Some("sv-SE"),
        _ => {
            // Fall back to the language part for region variants we don't
            // explicitly list (e.g. `en-AU`, `de-AT`, `fr-CA`).
            let lang = key.split('-').next().unwrap_or("");
            match lang {
                "en" => Some("en-US"),
                "fi" => Some("fi-FI"),
                "zh" => Some("zh-CN"),
                "de" => Some("de-DE"),
                "fr" => Some("fr-FR"),
                "es" => Some("es-ES"),
                "sv" => Some("sv-SE"),
                _ => None,
            }
        }
    }
}

/// Look up a bundled locale by identifier.
///
/// Accepts BCP-47 (`fi-FI`) and POSIX (`fi_FI.UTF-8`) spellings, matches
/// case-insensitively, and falls back to the language part for unlisted
/// regions.
pub fn get_locale(id: &str) -> Option<&'static DateLocale> {
    match normalize_locale_id(id)? {
        "en-US" => Some(&EN_US),
        "en-GB" => Some(&EN_GB),
        "fi-FI" => Some(&FI_FI),
        "zh-CN" => Some(&ZH_CN),
        "de-DE" => Some(&DE_DE),
        "fr-FR" => Some(&FR_FR),
        "es-ES" => Some(&ES_ES),
        "sv-SE" => Some(&SV_SE),
        _ => None,
    }
}
