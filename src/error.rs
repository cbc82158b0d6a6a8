//! Error types for protocol parsing and encoding

use thiserror::Error;

/// Errors that can occur when parsing or building AudioMoth packets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// Packet is too short to contain required data
    #[error("Packet too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// Leading message-type byte doesn't match the expected response kind
    #[error("Invalid message type: expected 0x{expected:02X}, got 0x{actual:02X}")]
    InvalidMessageType { expected: u8, actual: u8 },

    /// Message-type byte not recognized
    #[error("Unknown message type: {0:#04X}")]
    UnknownMessageType(u8),

    /// Time-period count outside the protocol's 0..=5 range
    #[error("Invalid time period count: {0} (at most 5 slots)")]
    InvalidTimePeriodCount(u8),

    /// No clock configuration exists for the requested rate on this firmware
    #[error("Unsupported sample rate: {sample_rate} Hz (legacy firmware: {legacy})")]
    UnsupportedSampleRate { sample_rate: u32, legacy: bool },

    /// Failed to deserialize packet structure
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Invalid packet data
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),
}

impl From<bincode::Error> for ProtocolError {
    fn from(e: bincode::Error) -> Self {
        ProtocolError::DeserializationFailed(e.to_string())
    }
}
