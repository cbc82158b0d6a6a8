//! USB HID protocol for AudioMoth recorders.
//!
//! This module contains wire protocol parsing and formatting for the HID
//! link. All functions are pure (no I/O): raw report payloads go in, typed
//! values come out, and command payloads are handed back for the caller's
//! transport to deliver.
//!
//! # Structure
//!
//! - [`settings`] - **Settings packet codec** - the 58-byte configuration
//!   packet in both directions
//! - [`report`] - **Report parsing** - typed parsing of inbound device
//!   reports
//! - [`command`] - **Command formatting** - outbound request payloads
//!
//! Every payload in either direction starts with a [`MessageType`] byte;
//! responses echo the type byte of the request they answer.
//!
//! # Example
//!
//! ```rust,no_run
//! use audiomoth_config::protocol::{command, report, MessageType};
//!
//! // Ask for the battery state
//! let request = command::format_request(MessageType::GetBattery);
//! // ... send request, receive response over HID ...
//!
//! let response: &[u8] = &[/* report data */];
//! match report::parse_report(response) {
//!     Ok(report) => println!("Got: {:?}", report),
//!     Err(e) => println!("Bad report: {}", e),
//! }
//! ```

pub mod command;
pub mod report;
pub mod settings;

/// Message types on the HID link
///
/// The same byte identifies a request and its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// Read the device clock
    GetTime = 0x01,
    /// Set the device clock
    SetTime = 0x02,
    /// Read the 64-bit device identifier
    GetDeviceId = 0x03,
    /// Read the battery state byte
    GetBattery = 0x04,
    /// Read the current settings packet
    GetSettings = 0x05,
    /// Write a new settings packet
    SetSettings = 0x06,
    /// Read the firmware version triple
    GetFirmwareVersion = 0x07,
    /// Read the firmware description string
    GetFirmwareDescription = 0x08,
}

impl MessageType {
    /// Try to convert a payload type byte to a MessageType
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(MessageType::GetTime),
            0x02 => Some(MessageType::SetTime),
            0x03 => Some(MessageType::GetDeviceId),
            0x04 => Some(MessageType::GetBattery),
            0x05 => Some(MessageType::GetSettings),
            0x06 => Some(MessageType::SetSettings),
            0x07 => Some(MessageType::GetFirmwareVersion),
            0x08 => Some(MessageType::GetFirmwareDescription),
            _ => None,
        }
    }
}

/// Helper function to extract a null-terminated C string from bytes
pub fn c_string(bytes: &[u8]) -> Option<String> {
    let null_pos = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..null_pos])
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
