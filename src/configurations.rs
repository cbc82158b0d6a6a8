//! Sample-rate clock configurations
//!
//! The firmware does not take a sample rate directly. It takes the clock
//! divider, ADC acquisition and oversampling constants and a post-decimation
//! divider that together realize one. This module carries those parameter
//! sets for every rate a firmware generation supports, plus the lookup seam
//! the settings encoder goes through.
//!
//! Firmware before 1.4.4 drives the ADC differently (oversampling a slow
//! base rate instead of decimating a fast one) and supports only three
//! rates; [`get_config`] picks the table from the legacy flag.

/// Clock parameters realizing one effective sample rate
///
/// `sample_rate` is the raw ADC rate written to the wire; dividing it by
/// `sample_rate_divider` yields `true_sample_rate` kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Effective rate after decimation, in kHz
    pub true_sample_rate: u32,
    /// Oscillator clock divider
    pub clock_divider: u8,
    /// ADC acquisition time in cycles
    pub acquisition_cycles: u8,
    /// Hardware oversampling factor
    pub oversample_rate: u8,
    /// Raw ADC rate in Hz
    pub sample_rate: u32,
    /// Decimation divider applied to the raw rate
    pub sample_rate_divider: u8,
}

/// Clock table for current firmware (1.4.4 and newer)
pub static CONFIGURATIONS: &[ClockConfig] = &[
    ClockConfig {
        true_sample_rate: 8,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 48,
    },
    ClockConfig {
        true_sample_rate: 16,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 24,
    },
    ClockConfig {
        true_sample_rate: 32,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 12,
    },
    ClockConfig {
        true_sample_rate: 48,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 8,
    },
    ClockConfig {
        true_sample_rate: 96,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 4,
    },
    ClockConfig {
        true_sample_rate: 192,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 2,
    },
    // The one rate not derived from the 384 kHz base clock
    ClockConfig {
        true_sample_rate: 250,
        clock_divider: 4,
        acquisition_cycles: 1,
        oversample_rate: 1,
        sample_rate: 250_000,
        sample_rate_divider: 1,
    },
    ClockConfig {
        true_sample_rate: 384,
        clock_divider: 4,
        acquisition_cycles: 1,
        oversample_rate: 1,
        sample_rate: 384_000,
        sample_rate_divider: 1,
    },
];

/// Clock table for legacy firmware (before 1.4.4), which oversamples a
/// 32 kHz base rate instead of decimating a fast one
pub static LEGACY_CONFIGURATIONS: &[ClockConfig] = &[
    ClockConfig {
        true_sample_rate: 8,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 4,
        sample_rate: 32_000,
        sample_rate_divider: 4,
    },
    ClockConfig {
        true_sample_rate: 16,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 2,
        sample_rate: 32_000,
        sample_rate_divider: 2,
    },
    ClockConfig {
        true_sample_rate: 32,
        clock_divider: 4,
        acquisition_cycles: 16,
        oversample_rate: 1,
        sample_rate: 32_000,
        sample_rate_divider: 1,
    },
];

/// Look up the clock parameters for an effective rate in kHz
pub fn get_config(true_sample_rate_khz: u32, legacy: bool) -> Option<&'static ClockConfig> {
    let table = if legacy {
        LEGACY_CONFIGURATIONS
    } else {
        CONFIGURATIONS
    };

    table
        .iter()
        .find(|config| config.true_sample_rate == true_sample_rate_khz)
}

/// Source of clock parameters for the settings encoder
///
/// Injected rather than hard-wired so that a host can substitute its own
/// tables, for instance for a custom firmware build.
pub trait ConfigLookup {
    /// Return the parameters for an effective rate in kHz, or `None` when
    /// the firmware generation does not support that rate
    fn lookup(&self, true_sample_rate_khz: u32, legacy: bool) -> Option<ClockConfig>;
}

/// The built-in tables as a [`ConfigLookup`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConfigs;

impl ConfigLookup for StandardConfigs {
    fn lookup(&self, true_sample_rate_khz: u32, legacy: bool) -> Option<ClockConfig> {
        get_config(true_sample_rate_khz, legacy).copied()
    }
}

// =============================================================================
// Tests
// =============================================================================
