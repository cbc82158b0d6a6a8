//! Settings packet codec
//!
//! The 58-byte configuration packet the firmware exchanges over the HID
//! link. The same layout travels in both directions: the device reports its
//! current configuration in it and accepts a new one in it. The firmware
//! copies the buffer straight into its own config struct, so every offset
//! and scale here has to match the firmware exactly.
//!
//! Parsing goes `&[u8]` to [`RecordingSettings`]; encoding goes
//! [`RecordingSettings`] to `[u8; 58]`. Encoding needs the device's
//! firmware generation (it selects the clock-parameter table) and an
//! explicit "now" with a UTC offset (it feeds the clock field, the
//! timezone bytes and the recording-date fix-up), which keeps the whole
//! codec deterministic and free of host state.
//!
//! Several fields are one-directional. The clock parameters are recomputed
//! from the sample rate on every encode and read past on parse; the
//! recording-date timestamps are written but not read back; and the
//! local-time byte doubles as the timezone-hour field when encoding while
//! the device treats any nonzero value as "local time enabled".

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::configurations::ConfigLookup;
use crate::device::DeviceInfo;
use crate::error::ProtocolError;
use crate::filter::{filter_wire_fields, FilterType};
use crate::schedule::{sort_time_periods, TimePeriod, MAX_TIME_PERIODS};

// =============================================================================
// Constants
// =============================================================================

/// Size of the settings packet
pub const SETTINGS_PACKET_SIZE: usize = std::mem::size_of::<SettingsPacket>();

/// Added to the last recording date so it is inclusive of its final day
const SECONDS_PER_DAY: i64 = 86_400;

// =============================================================================
// Wire Layout
// =============================================================================

/// One time-period slot inside the packet
#[derive(Deserialize, Debug, Clone, Copy)]
#[repr(C, packed)]
struct TimePeriodSlot {
    start_minutes: [u8; 2],
    end_minutes: [u8; 2],
}

/// Wire layout of the settings packet (58 bytes, little-endian)
///
/// Field order and sizes follow the firmware's config struct. Unused
/// time-period slots are physically present as zero padding, which is what
/// keeps the packet a fixed size.
#[derive(Deserialize, Debug, Clone, Copy)]
#[repr(C, packed)]
struct SettingsPacket {
    unix_time: [u8; 4],                        // 0..4   device clock, Unix seconds
    gain: u8,                                  // 4      gain index
    clock_divider: u8,                         // 5
    acquisition_cycles: u8,                    // 6
    oversample_rate: u8,                       // 7
    sample_rate: [u8; 4],                      // 8..12  raw ADC rate in Hz
    sample_rate_divider: u8,                   // 12
    sleep_duration: [u8; 2],                   // 13..15 seconds
    record_duration: [u8; 2],                  // 15..17 seconds
    led_enabled: u8,                           // 17
    time_period_count: u8,                     // 18     meaningful slots, 0..=5
    time_periods: [TimePeriodSlot; 5],         // 19..39
    local_time: u8,                            // 39     timezone hours out, nonzero = local in
    low_voltage_cutoff_enabled: u8,            // 40
    battery_level_check_enabled: u8,           // 41
    timezone_minutes: u8,                      // 42     non-whole-hour timezone remainder
    duty_enabled: u8,                          // 43
    earliest_recording_time: [u8; 4],          // 44..48 Unix seconds, 0 = unbounded
    latest_recording_time: [u8; 4],            // 48..52 Unix seconds, 0 = unbounded
    lower_filter: [u8; 2],                     // 52..54 units of 100 Hz
    higher_filter: [u8; 2],                    // 54..56 units of 100 Hz
    amplitude_threshold: [u8; 2],              // 56..58 0 = disabled
}

// =============================================================================
// Recording Settings
// =============================================================================

/// Complete recording configuration for one device
///
/// The editable form of the settings packet. Build one by parsing a device
/// report with [`RecordingSettings::parse`] or by filling in the fields,
/// then turn it back into wire bytes with [`RecordingSettings::encode`].
///
/// Serializes with camelCase field names for hand-off to a configuration
/// UI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSettings {
    /// Hardware gain index (0-4)
    pub gain: i8,
    /// Effective sample rate in Hz
    pub sample_rate: u32,
    /// Duty-cycle sleep span in seconds
    pub sleep_duration: u16,
    /// Duty-cycle record span in seconds
    pub record_duration: u16,
    /// Flash the LED while recording
    pub led_enabled: bool,
    /// Daily recording windows, at most [`MAX_TIME_PERIODS`]
    pub time_periods: Vec<TimePeriod>,
    /// Schedule is expressed in local time rather than UTC
    pub local_time: bool,
    /// Stop recording when the supply voltage sags
    pub low_voltage_cutoff_enabled: bool,
    /// Check the battery level before each recording
    pub battery_level_check_enabled: bool,
    /// Alternate between recording and sleeping inside each window
    pub duty_enabled: bool,
    /// Apply the band-pass filter block
    pub pass_filters_enabled: bool,
    /// Filter shape; not carried on the wire, so parsing always yields
    /// [`FilterType::None`]
    pub filter_type: FilterType,
    /// Lower filter edge in Hz
    pub lower_filter: u32,
    /// Higher filter edge in Hz
    pub higher_filter: u32,
    /// Only keep samples crossing the amplitude threshold
    pub amplitude_thresholding_enabled: bool,
    /// Amplitude threshold in raw sample units
    pub amplitude_threshold: u16,
    /// First day of the recording window, in local-day terms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_recording_date: Option<NaiveDate>,
    /// Last day of the recording window (inclusive), in local-day terms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_recording_date: Option<NaiveDate>,
}

impl RecordingSettings {
    /// Parse a settings packet as reported by the device.
    ///
    /// Accepts any buffer of at least [`SETTINGS_PACKET_SIZE`] bytes and
    /// ignores anything beyond it, so a full HID report can be passed in
    /// directly.
    ///
    /// The device clock and the raw clock parameters (divider, acquisition
    /// cycles, oversample rate, sample-rate divider) are read past but not
    /// retained; encoding recomputes them from `sample_rate` and the
    /// firmware generation. The recording-date timestamps and the
    /// timezone-minutes byte are outbound-only and likewise not retained.
    ///
    /// `pass_filters_enabled` and `amplitude_thresholding_enabled` are
    /// derived from the wire values: all-zero filter edges mean filtering
    /// is off, a zero threshold means thresholding is off.
    pub fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() < SETTINGS_PACKET_SIZE {
            return Err(ProtocolError::TooShort {
                expected: SETTINGS_PACKET_SIZE,
                actual: data.len(),
            });
        }

        let packet: SettingsPacket = bincode::deserialize(&data[..SETTINGS_PACKET_SIZE])?;

        let count = packet.time_period_count;
        if count as usize > MAX_TIME_PERIODS {
            return Err(ProtocolError::InvalidTimePeriodCount(count));
        }

        // Slots beyond the count are zero padding, not periods
        let slots = packet.time_periods;
        let time_periods = slots[..count as usize]
            .iter()
            .map(|slot| TimePeriod {
                start_minutes: u16::from_le_bytes(slot.start_minutes),
                end_minutes: u16::from_le_bytes(slot.end_minutes),
            })
            .collect();

        let lower_filter = u16::from_le_bytes(packet.lower_filter);
        let higher_filter = u16::from_le_bytes(packet.higher_filter);
        let amplitude_threshold = u16::from_le_bytes(packet.amplitude_threshold);

        let settings = RecordingSettings {
            gain: packet.gain as i8,
            sample_rate: u32::from_le_bytes(packet.sample_rate),
            sleep_duration: u16::from_le_bytes(packet.sleep_duration),
            record_duration: u16::from_le_bytes(packet.record_duration),
            led_enabled: packet.led_enabled != 0,
            time_periods,
            local_time: packet.local_time != 0,
            low_voltage_cutoff_enabled: packet.low_voltage_cutoff_enabled != 0,
            battery_level_check_enabled: packet.battery_level_check_enabled != 0,
            duty_enabled: packet.duty_enabled != 0,
            pass_filters_enabled: !(lower_filter == 0 && higher_filter == 0),
            filter_type: FilterType::None,
            lower_filter: u32::from(lower_filter),
            higher_filter: u32::from(higher_filter),
            amplitude_thresholding_enabled: amplitude_threshold > 0,
            amplitude_threshold,
            first_recording_date: None,
            last_recording_date: None,
        };

        trace!(
            "Parsed settings: {} Hz, gain {}, {} time periods",
            settings.sample_rate,
            settings.gain,
            settings.time_periods.len()
        );

        Ok(settings)
    }

    /// Encode these settings into a packet ready to send.
    ///
    /// `configs` supplies the clock parameters for `sample_rate`; its raw
    /// ADC rate and divider go on the wire, not the requested rate. `now`
    /// feeds the device-clock field, the timezone bytes (whole hours plus
    /// the minute remainder of its UTC offset, written only when
    /// `local_time` is set) and the recording-date fix-up.
    ///
    /// Time periods are written sorted by start minute, with unused slots
    /// zeroed. Recording dates become Unix-second bounds: the first date's
    /// local midnight and the end of the last date's final day, each
    /// clamped to the 32-bit range, and 0 (unbounded) when the date is
    /// absent or `local_time` is off. The amplitude threshold is written
    /// only when thresholding is enabled.
    pub fn encode(
        &self,
        device: &DeviceInfo,
        configs: &dyn ConfigLookup,
        now: DateTime<FixedOffset>,
    ) -> Result<[u8; SETTINGS_PACKET_SIZE], ProtocolError> {
        if self.time_periods.len() > MAX_TIME_PERIODS {
            return Err(ProtocolError::InvalidTimePeriodCount(
                self.time_periods.len() as u8,
            ));
        }

        let legacy = device.is_legacy_firmware();
        let config = configs.lookup(self.sample_rate / 1000, legacy).ok_or(
            ProtocolError::UnsupportedSampleRate {
                sample_rate: self.sample_rate,
                legacy,
            },
        )?;

        debug!(
            "Encoding settings: {} Hz as ADC {} Hz / {} (legacy firmware: {})",
            self.sample_rate, config.sample_rate, config.sample_rate_divider, legacy
        );

        // The firmware expects the slots ordered by start minute
        let mut periods = self.time_periods.clone();
        sort_time_periods(&mut periods);

        let mut slots = [TimePeriodSlot {
            start_minutes: [0; 2],
            end_minutes: [0; 2],
        }; MAX_TIME_PERIODS];
        for (slot, period) in slots.iter_mut().zip(&periods) {
            slot.start_minutes = period.start_minutes.to_le_bytes();
            slot.end_minutes = period.end_minutes.to_le_bytes();
        }

        let offset_seconds = now.offset().local_minus_utc();
        let (timezone_hours, timezone_minutes) = if self.local_time {
            ((offset_seconds / 3600) as i8, ((offset_seconds / 60) % 60) as i8)
        } else {
            (0, 0)
        };

        let earliest_recording_time = match self.first_recording_date {
            Some(date) if self.local_time => clamp_timestamp(local_date_to_timestamp(date, now)),
            _ => 0,
        };
        let latest_recording_time = match self.last_recording_date {
            Some(date) if self.local_time => {
                clamp_timestamp(local_date_to_timestamp(date, now) + SECONDS_PER_DAY)
            }
            _ => 0,
        };

        let (lower_filter, higher_filter) = filter_wire_fields(
            self.pass_filters_enabled,
            self.filter_type,
            self.lower_filter,
            self.higher_filter,
        );

        let amplitude_threshold = if self.amplitude_thresholding_enabled {
            self.amplitude_threshold
        } else {
            0
        };

        let packet = SettingsPacket {
            unix_time: (now.timestamp() as u32).to_le_bytes(),
            gain: self.gain as u8,
            clock_divider: config.clock_divider,
            acquisition_cycles: config.acquisition_cycles,
            oversample_rate: config.oversample_rate,
            sample_rate: config.sample_rate.to_le_bytes(),
            sample_rate_divider: config.sample_rate_divider,
            sleep_duration: self.sleep_duration.to_le_bytes(),
            record_duration: self.record_duration.to_le_bytes(),
            led_enabled: self.led_enabled as u8,
            time_period_count: periods.len() as u8,
            time_periods: slots,
            local_time: timezone_hours as u8,
            low_voltage_cutoff_enabled: self.low_voltage_cutoff_enabled as u8,
            battery_level_check_enabled: self.battery_level_check_enabled as u8,
            timezone_minutes: timezone_minutes as u8,
            duty_enabled: self.duty_enabled as u8,
            earliest_recording_time: earliest_recording_time.to_le_bytes(),
            latest_recording_time: latest_recording_time.to_le_bytes(),
            lower_filter: lower_filter.to_le_bytes(),
            higher_filter: higher_filter.to_le_bytes(),
            amplitude_threshold: amplitude_threshold.to_le_bytes(),
        };

        // Safe: struct is repr(C, packed) with known size
        Ok(unsafe { std::mem::transmute(packet) })
    }

    /// Encode with the host's current time and timezone offset.
    ///
    /// Convenience for interactive use; [`RecordingSettings::encode`] with
    /// an explicit `now` is the deterministic form.
    pub fn encode_local(
        &self,
        device: &DeviceInfo,
        configs: &dyn ConfigLookup,
    ) -> Result<[u8; SETTINGS_PACKET_SIZE], ProtocolError> {
        self.encode(device, configs, Local::now().fixed_offset())
    }

    /// Serialize to JSON with camelCase field names
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from the JSON produced by [`RecordingSettings::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Turn a recording date into the Unix timestamp the firmware expects.
///
/// The date was picked in local-day terms but travels as a UTC instant.
/// When local time and UTC sit on different calendar days at the moment of
/// encoding, the chosen day-of-month would land one day off on the device;
/// compensate by shifting the date back by the day difference, plus sixty
/// seconds per shifted day, before converting at the caller's offset.
fn local_date_to_timestamp(date: NaiveDate, now: DateTime<FixedOffset>) -> i64 {
    let day_diff = i64::from(now.day()) - i64::from(now.with_timezone(&Utc).day());

    let shifted = date.and_time(NaiveTime::MIN) - Duration::days(day_diff)
        + Duration::seconds(60 * day_diff);

    shifted.and_utc().timestamp() - i64::from(now.offset().local_minus_utc())
}

/// Clamp a timestamp into the unsigned 32-bit range of the wire fields
fn clamp_timestamp(seconds: i64) -> u32 {
    seconds.clamp(0, i64::from(u32::MAX)) as u32
}

// =============================================================================
// Tests
// =============================================================================
