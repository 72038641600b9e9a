//! This library is the foundation for the `s1isp-in` crate. It holds the
//! structures, lookup tables and bit-level decoders for Sentinel-1 SAR
//! instrument source packets, and can be built either with serialization
//! support or in a slightly more lightweight manner without it (see
//! features).
extern crate num_complex;

#[cfg(any(feature = "to_json", feature = "serde"))]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod bitreader;
pub mod enums;
pub mod errors;
pub mod header_structs;
pub mod huffman;
pub mod reconstruction;
pub mod settings;
pub mod udf;
#[cfg(test)]
mod tests;

pub use errors::IspError;

pub use enums::*;
pub use header_structs::*;
pub use settings::{DecodeSettings, InvalidPacketPolicy, UserDataMode};
pub use udf::UserData;

pub const PRIMARY_HEADER_LEN: usize = 6;
pub const SECONDARY_HEADER_LEN: usize = 62;
/// The fixed ancillary pattern at bytes 12..16 of every packet (the first
/// field behind the datation service), the primary reacquisition anchor
/// when resynchronising a damaged stream.
pub const SYNC_MARKER: u32 = 0x352E_F853;
/// The instrument reference frequency in MHz; every timing field in the
/// radar configuration service counts cycles of it.
pub const F_REF_MHZ: f64 = 37.534_722_24;
/// The instrument reference frequency in Hz.
pub const F_REF_HZ: f64 = F_REF_MHZ * 1e6;

/// This structure represents one instrument source packet.
///
/// The headers are parsed and stored in the structure, the user data is
/// stored in a memory map and referenced here as start and end indices.
#[derive(Debug, Clone)]
pub struct Isp {
    /// The parsed 6-byte primary header.
    pub(crate) primary_header: PrimaryHeader,
    /// The parsed 62-byte secondary header.
    pub(crate) secondary_header: SecondaryHeader,
    /// Starting byte of the whole packet on the map.
    pub(crate) packet_start_byte: usize,
    /// Starting byte of the user data field on the map.
    pub(crate) udf_start_byte: usize,
    /// Length of the user data field in bytes on the map.
    pub(crate) udf_byte_len: usize,
}

impl Isp {
    /// Construct a new packet record from its parsed headers and the byte
    /// locations in the file or slice where the user data is kept.
    pub fn new(
        primary_header: PrimaryHeader,
        secondary_header: SecondaryHeader,
        packet_start: usize,
        udf_start: usize,
        udf_len: usize,
    ) -> Self {
        Isp {
            primary_header,
            secondary_header,
            packet_start_byte: packet_start,
            udf_start_byte: udf_start,
            udf_byte_len: udf_len,
        }
    }

    /// Get a reference to the primary header.
    pub fn get_primary_header(&self) -> &PrimaryHeader {
        &self.primary_header
    }

    /// Get a reference to the secondary header.
    pub fn get_secondary_header(&self) -> &SecondaryHeader {
        &self.secondary_header
    }

    /// Get the starting byte of the packet.
    pub fn get_start(&self) -> usize {
        self.packet_start_byte
    }

    /// Get the starting byte of the user data field.
    pub fn get_udf_start(&self) -> usize {
        self.udf_start_byte
    }

    /// Get the length of the user data field in bytes.
    pub fn len(&self) -> usize {
        self.udf_byte_len
    }

    /// Obligatory `is_empty` method.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run both header sanity checks against this packet's file offset.
    pub fn validate(&self) -> Result<(), IspError> {
        self.primary_header.validate(self.packet_start_byte)?;
        self.secondary_header.validate(self.packet_start_byte)
    }
}
