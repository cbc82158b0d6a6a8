//! Device report parsing
//!
//! Every response from the device is a payload whose first byte echoes the
//! [`MessageType`] of the request it answers. This module turns those
//! payloads into typed values: the clock, identity and battery reports a
//! host reads during its handshake, and the settings packet echoed by the
//! configuration round-trip.
//!
//! [`parse_report`] dispatches on the leading byte; the per-kind functions
//! are public for callers that already know what they asked for.

use chrono::{DateTime, Utc};
use log::trace;

use super::settings::{RecordingSettings, SETTINGS_PACKET_SIZE};
use super::{c_string, MessageType};
use crate::device::{BatteryState, FirmwareVersion};
use crate::error::ProtocolError;

/// Size of a clock report: type byte plus 32-bit Unix seconds
pub const TIME_REPORT_SIZE: usize = 5;

/// Size of an identifier report: type byte plus the 64-bit identifier
pub const DEVICE_ID_REPORT_SIZE: usize = 9;

/// One parsed device report
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceReport {
    /// Device clock (answers both get-time and set-time)
    Time(DateTime<Utc>),
    /// 16-hex-digit device identifier
    DeviceId(String),
    /// Battery state
    Battery(BatteryState),
    /// Settings as stored on the device (answers both get- and
    /// set-settings)
    Settings(RecordingSettings),
    /// Firmware version triple
    FirmwareVersion(FirmwareVersion),
    /// Firmware description string
    FirmwareDescription(String),
}

/// Parse any device report, dispatching on the leading type byte
pub fn parse_report(data: &[u8]) -> Result<DeviceReport, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::TooShort {
            expected: 1,
            actual: 0,
        });
    }

    trace!("Device report type 0x{:02X}, {} bytes", data[0], data.len());

    match MessageType::from_u8(data[0]) {
        Some(MessageType::GetTime) | Some(MessageType::SetTime) => {
            Ok(DeviceReport::Time(parse_time(data)?))
        }
        Some(MessageType::GetDeviceId) => Ok(DeviceReport::DeviceId(parse_device_id(data)?)),
        Some(MessageType::GetBattery) => Ok(DeviceReport::Battery(parse_battery(data)?)),
        Some(MessageType::GetSettings) | Some(MessageType::SetSettings) => {
            Ok(DeviceReport::Settings(parse_settings(data)?))
        }
        Some(MessageType::GetFirmwareVersion) => Ok(DeviceReport::FirmwareVersion(
            parse_firmware_version(data)?,
        )),
        Some(MessageType::GetFirmwareDescription) => Ok(DeviceReport::FirmwareDescription(
            parse_firmware_description(data)?,
        )),
        None => Err(ProtocolError::UnknownMessageType(data[0])),
    }
}

/// Parse a clock report (the get-time response or the set-time echo)
pub fn parse_time(data: &[u8]) -> Result<DateTime<Utc>, ProtocolError> {
    if data.len() < TIME_REPORT_SIZE {
        return Err(ProtocolError::TooShort {
            expected: TIME_REPORT_SIZE,
            actual: data.len(),
        });
    }
    if data[0] != MessageType::GetTime as u8 && data[0] != MessageType::SetTime as u8 {
        return Err(ProtocolError::InvalidMessageType {
            expected: MessageType::GetTime as u8,
            actual: data[0],
        });
    }

    let seconds = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    DateTime::from_timestamp(i64::from(seconds), 0)
        .ok_or_else(|| ProtocolError::InvalidPacket(format!("Timestamp out of range: {}", seconds)))
}

/// Parse an identifier report into its 16-hex-digit form
pub fn parse_device_id(data: &[u8]) -> Result<String, ProtocolError> {
    check_header(data, MessageType::GetDeviceId, DEVICE_ID_REPORT_SIZE)?;

    let mut raw = [0u8; 8];
    raw.copy_from_slice(&data[1..9]);
    Ok(format!("{:016X}", u64::from_le_bytes(raw)))
}

/// Parse a battery report
pub fn parse_battery(data: &[u8]) -> Result<BatteryState, ProtocolError> {
    check_header(data, MessageType::GetBattery, 2)?;
    Ok(BatteryState::from_byte(data[1]))
}

/// Parse a settings report (the get-settings response or the echo the
/// device sends back after set-settings)
pub fn parse_settings(data: &[u8]) -> Result<RecordingSettings, ProtocolError> {
    let expected = 1 + SETTINGS_PACKET_SIZE;
    if data.len() < expected {
        return Err(ProtocolError::TooShort {
            expected,
            actual: data.len(),
        });
    }
    if data[0] != MessageType::GetSettings as u8 && data[0] != MessageType::SetSettings as u8 {
        return Err(ProtocolError::InvalidMessageType {
            expected: MessageType::GetSettings as u8,
            actual: data[0],
        });
    }

    RecordingSettings::parse(&data[1..])
}

/// Parse a firmware version report
pub fn parse_firmware_version(data: &[u8]) -> Result<FirmwareVersion, ProtocolError> {
    check_header(data, MessageType::GetFirmwareVersion, 4)?;
    Ok(FirmwareVersion::new(data[1], data[2], data[3]))
}

/// Parse the zero-terminated firmware description string
pub fn parse_firmware_description(data: &[u8]) -> Result<String, ProtocolError> {
    check_header(data, MessageType::GetFirmwareDescription, 2)?;
    Ok(c_string(&data[1..]).unwrap_or_default())
}

fn check_header(
    data: &[u8],
    expected_type: MessageType,
    min_len: usize,
) -> Result<(), ProtocolError> {
    if data.len() < min_len {
        return Err(ProtocolError::TooShort {
            expected: min_len,
            actual: data.len(),
        });
    }
    if data[0] != expected_type as u8 {
        return Err(ProtocolError::InvalidMessageType {
            expected: expected_type as u8,
            actual: data[0],
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
