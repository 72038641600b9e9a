//! This is a library for reading Sentinel-1 SAR instrument source packet
//! files into rust. It is designed for efficient reading of packet headers
//! and sample data without holding potentially very large downlink files in
//! memory.
//!
//! The library follows the SAR space packet protocol data unit and Level-0
//! product format specifications. Two access styles are offered: a mapped
//! [`IspFile`] framing every packet up front with user data decoded on
//! demand, and the lazy [`stream::IspStream`] walking any byte reader one
//! packet at a time.
extern crate log;
extern crate memmap2;
extern crate num_complex;

pub mod index;
pub mod memory_map;
pub mod stream;
pub mod subcom;
#[cfg(test)]
mod tests;

use num_complex::Complex32;

use memory_map::MappedIsp;
use subcom::{AncillaryDataFrame, SubcomAccumulator};

pub use s1isp_core::enums;
pub use s1isp_core::errors::*;
pub use s1isp_core::header_structs::*;
pub use s1isp_core::udf;
pub use s1isp_core::{DecodeSettings, InvalidPacketPolicy, Isp, UserData, UserDataMode};

/// A structure which represents a mapped instrument source packet file.
///
/// The structure contains:
///
/// - The memory map of the raw downlink file.
///
/// - The framed packets (parsed headers plus the "coordinates" used to
///   access the user data in the map).
///
/// - The sub-commutated ancillary frames collected across the packets.
///
/// NB: The packet headers are parsed, but the sample data stays in the
/// memory map until asked for.
pub struct IspFile {
    pub(crate) settings: DecodeSettings,
    pub(crate) isps: Vec<Isp>,
    pub(crate) ancillary: Vec<AncillaryDataFrame>,
    pub(crate) terminal_error: Option<IspError>,
    data: MappedIsp,
}

impl IspFile {
    /// Attempts to open a raw packet file stored in a given location, with
    /// a given set of settings. This creates an instance of [`IspFile`]
    /// which can then be used as a handle to get headers and sample data.
    ///
    /// Framing walks the whole file up front. A truncated tail does not
    /// fail the open: every complete record is kept and the problem is
    /// reported through [`IspFile::terminal_error`].
    pub fn open(file_name: &str, settings: DecodeSettings) -> Result<Self, IspError> {
        let data = MappedIsp::new(file_name)?;
        let (isps, terminal_error) = data.get_isps(&settings);

        let mut accumulator = SubcomAccumulator::new();
        for isp in &isps {
            let sub = &isp.get_secondary_header().sub_commutation;
            accumulator.push(
                sub.data_word_index,
                sub.data_word,
                isp.get_secondary_header().counters.pri_count,
            );
        }
        accumulator.flush();
        let ancillary = accumulator.take_frames();

        Ok(IspFile {
            settings,
            isps,
            ancillary,
            terminal_error,
            data,
        })
    }

    /// Get a reference to the [`DecodeSettings`] which were used when
    /// opening the file in this instance of [`IspFile`].
    pub fn get_settings(&self) -> &DecodeSettings {
        &self.settings
    }

    /// Get the number of framed packets in the file.
    pub fn packet_count(&self) -> usize {
        self.isps.len()
    }

    /// Get the reference to a certain packet by the order in which it
    /// appears in the file. An out of bounds index returns a `None`.
    pub fn get_isp(&self, i: usize) -> Option<&Isp> {
        self.isps.get(i)
    }

    /// Iterate through the framed packets.
    pub fn isps_iter(&self) -> std::slice::Iter<Isp> {
        self.isps.iter()
    }

    /// The byte offsets of every framed packet, in file order.
    pub fn packet_offsets(&self) -> Vec<usize> {
        self.isps.iter().map(|isp| isp.get_start()).collect()
    }

    /// The sub-commutated ancillary frames collected across the file, in
    /// completion order.
    pub fn ancillary_frames(&self) -> &[AncillaryDataFrame] {
        &self.ancillary
    }

    /// The error that stopped the framing walk early, if any. Records
    /// framed before the problem stay valid.
    pub fn terminal_error(&self) -> Option<&IspError> {
        self.terminal_error.as_ref()
    }

    /// Gets the user data for the packet with a given index as a raw
    /// `Vec<u8>`. In this case, if the index is out of bounds, an error is
    /// returned to reflect that there was a failure to retrieve the data.
    pub fn get_user_data_as_bytes(&self, i: usize) -> Result<Vec<u8>, IspError> {
        let isp = self.get_isp(i).ok_or(IspError::PacketNotFound { i })?;
        Ok(self.data.get_user_data(isp).to_vec())
    }

    /// Gets the user data for the packet with a given index decoded into
    /// complex samples, dispatching on the packet's BAQ and test modes.
    pub fn get_user_data_as_complex(&self, i: usize) -> Result<Vec<Complex32>, IspError> {
        let isp = self.get_isp(i).ok_or(IspError::PacketNotFound { i })?;
        self.get_user_data_as_complex_from_isp(isp)
    }

    /// Decodes the user data for a given [`Isp`] from the same [`IspFile`].
    /// If one is already holding a reference to a packet, this function
    /// should be preferred over [`Self::get_user_data_as_complex`].
    pub fn get_user_data_as_complex_from_isp(&self, isp: &Isp) -> Result<Vec<Complex32>, IspError> {
        udf::decode_user_data(self.data.get_user_data(isp), isp.get_secondary_header())
    }

    /// This function consumes the instance of [`IspFile`] returning the
    /// framed packets and collected ancillary frames in an efficient
    /// manner.
    ///
    /// NB: The internal mapping is discarded in the process, so once this
    /// function is called, user data can no longer be accessed.
    pub fn deconstruct(self) -> (Vec<Isp>, Vec<AncillaryDataFrame>, Option<IspError>) {
        let IspFile {
            isps,
            ancillary,
            terminal_error,
            ..
        } = self;
        (isps, ancillary, terminal_error)
    }
}
