//! Outbound command formatting
//!
//! Pure functions building the request payloads sent to the device. Only
//! the meaningful bytes are produced; the transport pads them into its
//! fixed-size reports.

use chrono::{DateTime, Utc};

use super::settings::SETTINGS_PACKET_SIZE;
use super::MessageType;

/// Size of a set-time payload: type byte plus 32-bit Unix seconds
pub const SET_TIME_PACKET_SIZE: usize = 5;

/// Size of a set-settings payload: type byte plus the settings packet
pub const SET_SETTINGS_PACKET_SIZE: usize = 1 + SETTINGS_PACKET_SIZE;

/// Format a parameterless request
///
/// Every read request is just its type byte; the device answers with a
/// report of the same type.
pub fn format_request(message_type: MessageType) -> [u8; 1] {
    [message_type as u8]
}

/// Format a set-time payload
///
/// Seconds since the Unix epoch, truncated to 32 bits like every
/// timestamp on this link.
pub fn format_set_time(time: DateTime<Utc>) -> [u8; SET_TIME_PACKET_SIZE] {
    let mut packet = [0; SET_TIME_PACKET_SIZE];
    packet[0] = MessageType::SetTime as u8;
    packet[1..].copy_from_slice(&(time.timestamp() as u32).to_le_bytes());
    packet
}

/// Format a set-settings payload from an encoded settings packet
pub fn format_set_settings(
    settings: &[u8; SETTINGS_PACKET_SIZE],
) -> [u8; SET_SETTINGS_PACKET_SIZE] {
    let mut packet = [0; SET_SETTINGS_PACKET_SIZE];
    packet[0] = MessageType::SetSettings as u8;
    packet[1..].copy_from_slice(settings);
    packet
}

// =============================================================================
// Tests
// =============================================================================
