//! # AudioMoth Config
//!
//! Platform-independent configuration protocol library for AudioMoth
//! acoustic recorders.
//!
//! This crate contains pure parsing and formatting logic with **zero I/O
//! dependencies**: raw USB HID report payloads go in, typed values come
//! out, and encoded packets are handed back for the caller's transport to
//! deliver. That keeps it equally at home in a desktop configuration tool,
//! a headless deployment script or a WASM bundle.
//!
//! ## Architecture
//!
//! Everything revolves around the 58-byte settings packet the firmware
//! exchanges in both directions. Parsing a device report yields an
//! editable [`RecordingSettings`]; encoding one back needs the device's
//! firmware generation (which selects the clock-parameter table) and an
//! explicit "now" with a UTC offset, so results are deterministic and
//! testable.
//!
//! ## Key Modules
//!
//! - [`protocol`] - Wire formats: the settings codec, report parsing and
//!   command formatting
//! - [`configurations`] - Clock-parameter tables per firmware generation
//!   and the lookup seam the encoder uses
//! - [`schedule`] - Daily recording windows
//! - [`filter`] - Band-pass filter shapes and their wire encoding
//! - [`device`] - Firmware version, battery state and device identity
//! - [`error`] - Error types for all parsing and encoding operations
//!
//! ## Example: Reading a device report
//!
//! ```rust,no_run
//! use audiomoth_config::{parse_report, DeviceReport};
//!
//! let payload: &[u8] = &[/* report data */];
//! match parse_report(payload) {
//!     Ok(DeviceReport::Settings(settings)) => {
//!         println!("Device records at {} Hz", settings.sample_rate);
//!     }
//!     Ok(report) => println!("Got: {:?}", report),
//!     Err(e) => println!("Bad report: {}", e),
//! }
//! ```
//!
//! ## Example: Building a settings packet
//!
//! ```rust
//! use audiomoth_config::{
//!     DeviceInfo, FirmwareVersion, RecordingSettings, StandardConfigs, TimePeriod,
//! };
//! use chrono::{FixedOffset, TimeZone};
//!
//! let mut settings = RecordingSettings::default();
//! settings.sample_rate = 48_000;
//! settings.gain = 2;
//! settings.led_enabled = true;
//! settings.time_periods = vec![TimePeriod::new(360, 720)]; // 06:00-12:00
//!
//! let device = DeviceInfo::new(FirmwareVersion::new(1, 5, 0));
//! let tz = FixedOffset::east_opt(0).unwrap();
//! let now = tz.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
//!
//! let packet = settings.encode(&device, &StandardConfigs, now)?;
//! assert_eq!(packet.len(), 58);
//! # Ok::<(), audiomoth_config::ProtocolError>(())
//! ```

pub mod configurations;
pub mod device;
pub mod error;
pub mod filter;
pub mod protocol;
pub mod schedule;

// Re-export commonly used types
pub use configurations::{get_config, ClockConfig, ConfigLookup, StandardConfigs};
pub use device::{BatteryState, DeviceInfo, FirmwareVersion, LEGACY_FIRMWARE_CUTOFF};
pub use error::ProtocolError;
pub use filter::{FilterType, FILTER_EDGE_OPEN};
pub use protocol::command::{format_request, format_set_settings, format_set_time};
pub use protocol::report::{parse_report, DeviceReport};
pub use protocol::settings::{RecordingSettings, SETTINGS_PACKET_SIZE};
pub use protocol::MessageType;
pub use schedule::{TimePeriod, MAX_TIME_PERIODS};
