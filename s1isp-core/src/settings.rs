//! This module contains the [`DecodeSettings`] structure which can be used
//! to customise how a packet stream is walked and decoded.
use crate::errors::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the decoders do with the user data field of each packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UserDataMode {
    /// Step over the user data without touching it.
    None,
    /// Keep the raw user data bytes on the record.
    Extract,
    /// Decode the user data into complex samples.
    Decode,
}

/// What the streaming decoder does when a packet fails its sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvalidPacketPolicy {
    /// Emit the offending record with its error attached and stop.
    Halt,
    /// Emit what can be decoded, then scan forward byte by byte for the
    /// next plausible packet header (anchored on the sync marker).
    Resync,
}

/// This structure holds the settings for walking a packet stream.
///
/// Direct field manipulation is not allowed since not all combinations of
/// values are valid; using the setter and getter functions is generally
/// safer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeSettings {
    /// Number of packets to step over (headers only) before emitting.
    pub(crate) skip_packets: usize,
    /// Stop after this many emitted records. `None` runs to the end.
    pub(crate) max_count: Option<usize>,
    /// Byte offset into the source at which the first packet starts.
    pub(crate) bytes_offset: u64,
    /// How the user data field of each emitted packet is handled.
    pub(crate) user_data_mode: UserDataMode,
    /// Recovery behaviour on packets that fail the sanity checks.
    pub(crate) invalid_packet_policy: InvalidPacketPolicy,
}

impl Default for DecodeSettings {
    /// Creates the default instance: start at byte 0, skip nothing, read to
    /// the end, leave user data untouched, halt on invalid packets.
    fn default() -> Self {
        DecodeSettings {
            skip_packets: 0,
            max_count: None,
            bytes_offset: 0,
            user_data_mode: UserDataMode::None,
            invalid_packet_policy: InvalidPacketPolicy::Halt,
        }
    }
}

impl DecodeSettings {
    #[cfg(feature = "to_json")]
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(&self).map_err(|e| e.to_string())
    }

    pub fn set_skip_packets(&mut self, count: usize) {
        self.skip_packets = count;
    }

    pub fn get_skip_packets(&self) -> usize {
        self.skip_packets
    }

    /// Limit the number of emitted records. A limit of zero is rejected as
    /// it would make every run a no-op.
    pub fn set_max_count(&mut self, count: usize) -> Result<(), IspError> {
        if count == 0 {
            return Err(IspError::SettingsError {
                msg: "a maximum record count of 0 would emit nothing".to_string(),
            });
        }
        self.max_count = Some(count);
        Ok(())
    }

    pub fn clear_max_count(&mut self) {
        self.max_count = None;
    }

    pub fn get_max_count(&self) -> Option<usize> {
        self.max_count
    }

    pub fn set_bytes_offset(&mut self, offset: u64) {
        self.bytes_offset = offset;
    }

    pub fn get_bytes_offset(&self) -> u64 {
        self.bytes_offset
    }

    pub fn set_user_data_mode(&mut self, mode: UserDataMode) {
        self.user_data_mode = mode;
    }

    pub fn get_user_data_mode(&self) -> UserDataMode {
        self.user_data_mode
    }

    pub fn set_invalid_packet_policy(&mut self, policy: InvalidPacketPolicy) {
        self.invalid_packet_policy = policy;
    }

    pub fn get_invalid_packet_policy(&self) -> InvalidPacketPolicy {
        self.invalid_packet_policy
    }
}
