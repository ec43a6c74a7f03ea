use serde::{Deserialize, Serialize};

/// Granularity at which a date field stores, renders, and parses values.
///
/// Variants are declared coarse to fine, and the derived `Ord` follows
/// declaration order, so `Resolution::Year < Resolution::Second`. Everything
/// finer than the active resolution is ignored for display and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Resolution {
    /// All resolutions, coarse to fine.
    pub const ALL: [Resolution; 6] = [
        Resolution::Year,
        Resolution::Month,
        Resolution::Day,
        Resolution::Hour,
        Resolution::Minute,
        Resolution::Second,
    ];

    /// True for resolutions that carry a time-of-day component.
    pub fn includes_time(self) -> bool {
        self >= Resolution::Hour
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Day
    }
}
