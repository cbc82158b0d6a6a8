//! Band-pass filter settings
//!
//! The settings packet stores the filter edges as 16-bit values in units of
//! 100 Hz. An edge of 0xFFFF marks that side as open, which is how a pure
//! low-pass or high-pass filter is expressed in a band-pass packet layout.

use serde::{Deserialize, Serialize};

/// Wire value marking a filter edge as open (no cutoff on that side)
pub const FILTER_EDGE_OPEN: u16 = 0xFFFF;

/// Filter shape applied to recordings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// No filter shaping
    #[default]
    None,
    /// Low-pass: keep frequencies below the higher edge
    Low,
    /// High-pass: keep frequencies above the lower edge
    High,
    /// Band-pass: keep frequencies between the two edges
    Band,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Low => "low",
            FilterType::High => "high",
            FilterType::Band => "band",
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute the two 16-bit filter fields of the settings packet.
///
/// Edges are given in Hz and stored in units of 100 Hz. With filtering
/// disabled both fields are zero. For `Low` and `High` the open side is
/// stored as [`FILTER_EDGE_OPEN`]. `None` with filtering enabled writes the
/// raw edges without scaling.
pub fn filter_wire_fields(
    enabled: bool,
    filter_type: FilterType,
    lower_hz: u32,
    higher_hz: u32,
) -> (u16, u16) {
    if !enabled {
        return (0, 0);
    }
    match filter_type {
        FilterType::Low => (FILTER_EDGE_OPEN, (higher_hz / 100) as u16),
        FilterType::High => ((lower_hz / 100) as u16, FILTER_EDGE_OPEN),
        FilterType::Band => ((lower_hz / 100) as u16, (higher_hz / 100) as u16),
        FilterType::None => (lower_hz as u16, higher_hz as u16),
    }
}
