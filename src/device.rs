//! Device identity and firmware metadata
//!
//! Firmware generation matters to the codec: releases before 1.4.4 support
//! only three sample rates and drive the ADC with a different clock table,
//! so the settings encoder needs to know which side of that cutoff a device
//! is on. The rest of this module carries the identity values a host reads
//! during its handshake with a device.

use serde::{Deserialize, Serialize};

/// First firmware release with the full eight-rate clock table
pub const LEGACY_FIRMWARE_CUTOFF: FirmwareVersion = FirmwareVersion {
    major: 1,
    minor: 4,
    patch: 4,
};

/// Semantic firmware version as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl FirmwareVersion {
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        FirmwareVersion {
            major,
            minor,
            patch,
        }
    }

    /// True for firmware released before [`LEGACY_FIRMWARE_CUTOFF`], which
    /// supports a reduced set of sample rates
    pub fn is_legacy(&self) -> bool {
        *self < LEGACY_FIRMWARE_CUTOFF
    }
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl TryFrom<&str> for FirmwareVersion {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = value.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(format!("Invalid firmware version: {}", value));
        }
        let number = |part: &str| {
            part.parse::<u8>()
                .map_err(|_| format!("Invalid firmware version: {}", value))
        };
        Ok(FirmwareVersion::new(
            number(parts[0])?,
            number(parts[1])?,
            number(parts[2])?,
        ))
    }
}

/// Battery state as reported by the device
///
/// The supply voltage travels as a single byte: 0 is below the 3.6 V
/// measurement floor, 15 and above is over the 4.9 V ceiling, and each step
/// in between adds 0.1 V to a 3.5 V base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatteryState {
    /// Below the 3.6 V measurement floor
    Low,
    /// Measured voltage in volts
    Voltage(f32),
    /// Above the 4.9 V measurement ceiling
    Full,
}

impl BatteryState {
    /// Decode the battery state byte from a battery report
    pub fn from_byte(state: u8) -> Self {
        match state {
            0 => BatteryState::Low,
            1..=14 => BatteryState::Voltage(3.5 + 0.1 * f32::from(state)),
            _ => BatteryState::Full,
        }
    }
}

impl std::fmt::Display for BatteryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatteryState::Low => write!(f, "< 3.6V"),
            BatteryState::Voltage(volts) => write!(f, "{:.1}V", volts),
            BatteryState::Full => write!(f, "> 4.9V"),
        }
    }
}

/// Metadata for one attached device
///
/// Collected from the identity reports during a handshake. The settings
/// encoder only consults the firmware generation; the identifier and
/// battery state are carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// 16-hex-digit device identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Reported firmware version
    pub firmware: FirmwareVersion,
    /// Battery state at the last report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryState>,
}

impl DeviceInfo {
    /// Device info with only the firmware version known
    pub fn new(firmware: FirmwareVersion) -> Self {
        DeviceInfo {
            device_id: None,
            firmware,
            battery: None,
        }
    }

    /// True when this device runs a pre-1.4.4 firmware with the reduced
    /// clock table
    pub fn is_legacy_firmware(&self) -> bool {
        self.firmware.is_legacy()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_version_display() {
        assert_eq!(FirmwareVersion::new(1, 4, 4).to_string(), "1.4.4");
        assert_eq!(FirmwareVersion::new(0, 9, 12).to_string(), "0.9.12");
    }

    #[test]
    fn test_firmware_version_from_str() {
        assert_eq!(
            FirmwareVersion::try_from("1.5.0"),
            Ok(FirmwareVersion::new(1, 5, 0))
        );
        assert_eq!(
            FirmwareVersion::try_from(" 1.4.4 "),
            Ok(FirmwareVersion::new(1, 4, 4))
        );
        assert!(FirmwareVersion::try_from("1.4").is_err());
        assert!(FirmwareVersion::try_from("1.4.4.2").is_err());
        assert!(FirmwareVersion::try_from("1.x.4").is_err());
        assert!(FirmwareVersion::try_from("1.4.999").is_err());
    }

    #[test]
    fn test_firmware_version_ordering() {
        assert!(FirmwareVersion::new(1, 2, 2) < FirmwareVersion::new(1, 4, 4));
        assert!(FirmwareVersion::new(1, 4, 3) < FirmwareVersion::new(1, 4, 4));
        assert!(FirmwareVersion::new(1, 10, 0) > FirmwareVersion::new(1, 9, 9));
        assert!(FirmwareVersion::new(2, 0, 0) > FirmwareVersion::new(1, 99, 99));
    }

    #[test]
    fn test_legacy_cutoff() {
        assert!(FirmwareVersion::new(1, 0, 0).is_legacy());
        assert!(FirmwareVersion::new(1, 4, 3).is_legacy());
        assert!(!FirmwareVersion::new(1, 4, 4).is_legacy());
        assert!(!FirmwareVersion::new(1, 5, 0).is_legacy());
        assert!(!FirmwareVersion::new(2, 0, 0).is_legacy());
    }

    #[test]
    fn test_battery_state_scale() {
        assert_eq!(BatteryState::from_byte(0), BatteryState::Low);
        assert_eq!(BatteryState::from_byte(0).to_string(), "< 3.6V");
        assert_eq!(BatteryState::from_byte(1).to_string(), "3.6V");
        assert_eq!(BatteryState::from_byte(6).to_string(), "4.1V");
        assert_eq!(BatteryState::from_byte(14).to_string(), "4.9V");
        assert_eq!(BatteryState::from_byte(15), BatteryState::Full);
        assert_eq!(BatteryState::from_byte(255).to_string(), "> 4.9V");
    }

    #[test]
    fn test_device_info_json_uses_camel_case() {
        let mut info = DeviceInfo::new(FirmwareVersion::new(1, 5, 0));
        info.device_id = Some("0123456789ABCDEF".to_string());

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["deviceId"], "0123456789ABCDEF");
        assert_eq!(json["firmware"]["major"], 1);
        // Unknown battery state is omitted entirely
        assert!(json.get("battery").is_none());
    }

    #[test]
    fn test_device_info_legacy_flag() {
        assert!(DeviceInfo::new(FirmwareVersion::new(1, 2, 0)).is_legacy_firmware());
        assert!(!DeviceInfo::new(FirmwareVersion::new(1, 5, 0)).is_legacy_firmware());
    }
}
