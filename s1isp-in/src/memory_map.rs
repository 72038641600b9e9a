//! This submodule exists to map the raw downlink file as a "memory map" and
//! then allow framing and reading of the packets.
use log::warn;
use memmap2::{Mmap, MmapOptions};

use s1isp_core::errors::*;
use s1isp_core::{
    DecodeSettings, InvalidPacketPolicy, Isp, PrimaryHeader, SecondaryHeader, PRIMARY_HEADER_LEN,
    SECONDARY_HEADER_LEN, SYNC_MARKER,
};

/// This structure represents a memory map with an underlying raw data file
/// handle.
pub struct MappedIsp {
    pub(crate) map: Mmap,
    _file: std::fs::File,
}

impl MappedIsp {
    /// Create a mapped packet file structure with a memory map and
    /// underlying file handle.
    pub(crate) fn new(file_name: &str) -> Result<MappedIsp, IspError> {
        let (map, file) = map_file_to_memory(file_name)?;

        // Sanity check to make sure the file can hold a packet header at all.
        if map.len() < PRIMARY_HEADER_LEN {
            return Err(IspError::FileTooShort);
        }
        Ok(MappedIsp { map, _file: file })
    }

    /// Frame every packet in the map according to the settings.
    ///
    /// Framing runs off the declared packet lengths; a packet that fails the
    /// sanity checks is handled per the invalid-packet policy. The walk
    /// never throws away completed records: a truncated tail or a halt is
    /// reported through the second element.
    pub(crate) fn get_isps(&self, settings: &DecodeSettings) -> (Vec<Isp>, Option<IspError>) {
        let mut isps: Vec<Isp> = Vec::new();
        let mut pos = settings.get_bytes_offset() as usize;
        let mut skipped = 0usize;
        let map = &self.map[..];

        loop {
            if let Some(max) = settings.get_max_count() {
                if isps.len() >= max {
                    return (isps, None);
                }
            }
            if pos >= map.len() {
                // Clean end between packets.
                return (isps, None);
            }
            if pos + PRIMARY_HEADER_LEN > map.len() {
                let err = self.truncation(&isps, skipped, pos, pos + PRIMARY_HEADER_LEN);
                return (isps, Some(err));
            }
            let primary = match PrimaryHeader::from_bytes(&map[pos..pos + PRIMARY_HEADER_LEN]) {
                Ok(header) => header,
                Err(e) => return (isps, Some(e)),
            };

            if let Err(e) = primary.validate(pos) {
                match settings.get_invalid_packet_policy() {
                    InvalidPacketPolicy::Resync => {
                        warn!("{}; scanning for the next plausible packet", e);
                        match self.find_next_packet(pos + 1) {
                            Some(next) => {
                                pos = next;
                                continue;
                            }
                            None => return (isps, None),
                        }
                    }
                    InvalidPacketPolicy::Halt => {
                        // The record is still framed when the declared
                        // length allows it, so the caller can inspect it.
                        if primary.packet_data_length as usize + 1 >= SECONDARY_HEADER_LEN
                            && pos + primary.packet_size() <= map.len()
                        {
                            let sh_start = pos + PRIMARY_HEADER_LEN;
                            if let Ok(secondary) = SecondaryHeader::from_bytes(
                                &map[sh_start..sh_start + SECONDARY_HEADER_LEN],
                            ) {
                                isps.push(Isp::new(
                                    primary,
                                    secondary,
                                    pos,
                                    sh_start + SECONDARY_HEADER_LEN,
                                    primary.user_data_length(),
                                ));
                            }
                        }
                        return (isps, Some(e));
                    }
                }
            }

            if (primary.packet_data_length as usize + 1) < SECONDARY_HEADER_LEN {
                let e = IspError::InvalidPacket {
                    reason: format!(
                        "packet data length {} cannot hold the secondary header",
                        primary.packet_data_length as usize + 1
                    ),
                    offset: pos,
                };
                return (isps, Some(e));
            }
            let packet_end = pos + primary.packet_size();
            if packet_end > map.len() {
                let err = self.truncation(&isps, skipped, pos, packet_end);
                return (isps, Some(err));
            }

            if skipped < settings.get_skip_packets() {
                skipped += 1;
                pos = packet_end;
                continue;
            }

            let sh_start = pos + PRIMARY_HEADER_LEN;
            let secondary =
                match SecondaryHeader::from_bytes(&map[sh_start..sh_start + SECONDARY_HEADER_LEN]) {
                    Ok(header) => header,
                    Err(e) => return (isps, Some(e)),
                };
            if let Err(e) = secondary.validate(pos) {
                if settings.get_invalid_packet_policy() == InvalidPacketPolicy::Halt {
                    // The record is still kept so the caller can look at it.
                    isps.push(Isp::new(
                        primary,
                        secondary,
                        pos,
                        sh_start + SECONDARY_HEADER_LEN,
                        primary.user_data_length(),
                    ));
                    return (isps, Some(e));
                }
                warn!("{}; keeping the record and continuing", e);
            }

            isps.push(Isp::new(
                primary,
                secondary,
                pos,
                sh_start + SECONDARY_HEADER_LEN,
                primary.user_data_length(),
            ));
            pos = packet_end;
        }
    }

    /// Get the raw user data bytes of a framed packet.
    pub(crate) fn get_user_data(&self, isp: &Isp) -> &[u8] {
        &self.map[isp.get_udf_start()..isp.get_udf_start() + isp.len()]
    }

    /// Byte-by-byte scan for the next plausible packet start: fixed primary
    /// header bits as required and the sync marker at packet bytes 12..16.
    fn find_next_packet(&self, from: usize) -> Option<usize> {
        let marker = SYNC_MARKER.to_be_bytes();
        let map = &self.map[..];
        let mut pos = from;
        while pos + PRIMARY_HEADER_LEN + SECONDARY_HEADER_LEN <= map.len() {
            if map[pos] >> 5 == 0
                && map[pos + 2] >> 6 == 0b11
                && map[pos + 12..pos + 16] == marker
            {
                return Some(pos);
            }
            pos += 1;
        }
        None
    }

    fn truncation(&self, isps: &[Isp], skipped: usize, pos: usize, end: usize) -> IspError {
        if isps.is_empty() && skipped == 0 {
            IspError::UnexpectedEof {
                needed: end.saturating_sub(self.map.len()) * 8,
                available: self.map.len().saturating_sub(pos) * 8,
            }
        } else {
            IspError::TruncatedStream { offset: pos }
        }
    }
}

/// This function creates a memory map from a file.
pub(crate) fn map_file_to_memory(file_name: &str) -> Result<(Mmap, std::fs::File), IspError> {
    let raw = std::fs::File::open(file_name).map_err(IspError::MapFile)?;
    let map = unsafe { MmapOptions::new().map(&raw).map_err(IspError::MapFile)? };
    Ok((map, raw))
}
