//! Recording schedule windows
//!
//! The firmware records inside up to five daily time windows, each a
//! start/end minute-of-day pair. The settings packet always carries five
//! 4-byte window slots; the count byte says how many are meaningful.

use serde::{Deserialize, Serialize};

/// Number of time-period slots in the settings packet
pub const MAX_TIME_PERIODS: usize = 5;

/// Minutes in a day; start/end minutes live in 0..1440
pub const MINUTES_PER_DAY: u16 = 1440;

/// A single daily recording window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    /// Window start, minutes after midnight (0-1439)
    pub start_minutes: u16,
    /// Window end, minutes after midnight (0-1439)
    pub end_minutes: u16,
}

impl TimePeriod {
    /// Create a new recording window
    pub fn new(start_minutes: u16, end_minutes: u16) -> Self {
        TimePeriod {
            start_minutes,
            end_minutes,
        }
    }
}

/// Sort windows ascending by start minute, the order the firmware expects.
///
/// The sort is stable, so windows sharing a start minute keep their given
/// order. Overlap between windows is not validated here.
pub fn sort_time_periods(periods: &mut [TimePeriod]) {
    periods.sort_by_key(|p| p.start_minutes);
}
