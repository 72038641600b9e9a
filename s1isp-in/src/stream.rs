//! The streaming packet decoder: a lazy, forward-only walk over any byte
//! source carrying concatenated instrument source packets.
//!
//! The walk has three states: scanning (stepping over packets the settings
//! ask to skip, headers only), decoding (emitting one record per packet)
//! and done (count reached, end of stream, or an unrecoverable error).
//! A packet that fails its sanity checks is still emitted with the error
//! attached; what happens next is decided by the invalid-packet policy.
use std::collections::VecDeque;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use s1isp_core::errors::IspError;
use s1isp_core::udf;
use s1isp_core::{
    DecodeSettings, InvalidPacketPolicy, PrimaryHeader, SecondaryHeader, UserData, UserDataMode,
    PRIMARY_HEADER_LEN, SECONDARY_HEADER_LEN, SYNC_MARKER,
};

use crate::subcom::{AncillaryDataFrame, SubcomAccumulator};

/// One record of the streaming decoder.
#[derive(Debug)]
pub struct StreamedIsp {
    pub primary_header: PrimaryHeader,
    pub secondary_header: SecondaryHeader,
    /// Byte offset of the packet's first byte in the source.
    pub byte_offset: u64,
    /// The user data, as requested through the settings.
    pub user_data: Option<UserData>,
    /// A per-packet error (failed sanity check or failed user data
    /// decode). The record's header fields are valid either way.
    pub error: Option<IspError>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StreamState {
    Scanning,
    Decoding,
    Done,
}

/// How a fixed-size read against the source ended.
pub(crate) enum ReadOutcome {
    Full,
    /// Clean end of stream: not a single byte was available.
    Eof,
    /// The stream ended inside the read; the payload is the filled length.
    Partial(usize),
    Failed(std::io::Error),
}

pub(crate) fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> ReadOutcome {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return if filled == 0 {
                    ReadOutcome::Eof
                } else {
                    ReadOutcome::Partial(filled)
                }
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return ReadOutcome::Failed(e),
        }
    }
    ReadOutcome::Full
}

/// A lazy packet decoder over any [`Read`] source.
///
/// Iterating yields `Result<StreamedIsp, IspError>`; an `Err` item is
/// terminal. Sub-commutation words of the emitted packets are collected on
/// the side and can be taken once the walk ends.
pub struct IspStream<R> {
    reader: R,
    settings: DecodeSettings,
    state: StreamState,
    /// Bytes consumed from the reader but not yet parsed (resynchronisation
    /// lookahead). Always drained before the reader itself.
    pending: VecDeque<u8>,
    /// Byte offset of the next unparsed byte.
    offset: u64,
    offset_applied: bool,
    packets_seen: usize,
    packets_skipped: usize,
    emitted: usize,
    cancel: Option<Arc<AtomicBool>>,
    subcom: SubcomAccumulator,
}

impl<R: Read> IspStream<R> {
    pub fn new(reader: R, settings: DecodeSettings) -> Self {
        let state = if settings.get_skip_packets() > 0 {
            StreamState::Scanning
        } else {
            StreamState::Decoding
        };
        IspStream {
            reader,
            settings,
            state,
            pending: VecDeque::new(),
            offset: 0,
            offset_applied: false,
            packets_seen: 0,
            packets_skipped: 0,
            emitted: 0,
            cancel: None,
            subcom: SubcomAccumulator::new(),
        }
    }

    /// Attach a cooperative cancellation flag, checked once per packet.
    /// Records emitted before the flag is raised stay valid.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The number of records emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// The sub-commutation frames completed so far.
    pub fn ancillary_frames(&self) -> &[AncillaryDataFrame] {
        self.subcom.frames()
    }

    /// Take ownership of the collected sub-commutation frames.
    pub fn take_ancillary_frames(&mut self) -> Vec<AncillaryDataFrame> {
        self.subcom.take_frames()
    }

    fn finish(&mut self) {
        if self.state != StreamState::Done {
            self.state = StreamState::Done;
            self.subcom.flush();
        }
    }

    /// Fill `buf` from the lookahead buffer first, then the reader.
    fn fill(&mut self, buf: &mut [u8]) -> ReadOutcome {
        let mut filled = 0;
        while filled < buf.len() {
            match self.pending.pop_front() {
                Some(byte) => {
                    buf[filled] = byte;
                    filled += 1;
                }
                None => break,
            }
        }
        if filled == buf.len() {
            return ReadOutcome::Full;
        }
        match read_exact_or_eof(&mut self.reader, &mut buf[filled..]) {
            ReadOutcome::Full => ReadOutcome::Full,
            ReadOutcome::Eof if filled == 0 => ReadOutcome::Eof,
            ReadOutcome::Eof => ReadOutcome::Partial(filled),
            ReadOutcome::Partial(n) => ReadOutcome::Partial(filled + n),
            failed => failed,
        }
    }

    /// Read and discard `count` bytes.
    fn discard(&mut self, mut count: usize) -> ReadOutcome {
        let mut scratch = [0u8; 8192];
        let mut any = false;
        while count > 0 {
            let take = count.min(scratch.len());
            match self.fill(&mut scratch[..take]) {
                ReadOutcome::Full => {
                    count -= take;
                    any = true;
                }
                ReadOutcome::Eof if any => return ReadOutcome::Partial(0),
                outcome => return outcome,
            }
        }
        ReadOutcome::Full
    }

    /// The terminal error for a stream that ended mid-packet: before the
    /// first whole packet that is a plain unexpected end of input, later it
    /// names the offset of the packet that was cut off.
    fn truncation(&self, packet_offset: u64, missing: usize) -> IspError {
        if self.packets_seen == 0 {
            IspError::UnexpectedEof {
                needed: missing * 8,
                available: 0,
            }
        } else {
            IspError::TruncatedStream {
                offset: packet_offset as usize,
            }
        }
    }

    /// Byte-by-byte scan for the next plausible packet start: version and
    /// sequence flag bits as required and the sync marker at packet bytes
    /// 12..16. Returns false when the source ends first.
    fn resync(&mut self) -> Result<bool, IspError> {
        const WINDOW: usize = 16;
        let marker = SYNC_MARKER.to_be_bytes();
        loop {
            while self.pending.len() < WINDOW {
                let mut byte = [0u8; 1];
                match read_exact_or_eof(&mut self.reader, &mut byte) {
                    ReadOutcome::Full => self.pending.push_back(byte[0]),
                    ReadOutcome::Eof | ReadOutcome::Partial(_) => return Ok(false),
                    ReadOutcome::Failed(e) => return Err(e.into()),
                }
            }
            let plausible = self.pending[0] >> 5 == 0
                && self.pending[2] >> 6 == 0b11
                && (0..4).all(|i| self.pending[12 + i] == marker[i]);
            if plausible {
                debug!("resynchronised on sync marker at byte {}", self.offset);
                return Ok(true);
            }
            self.pending.pop_front();
            self.offset += 1;
        }
    }
}

impl<R: Read> Iterator for IspStream<R> {
    type Item = Result<StreamedIsp, IspError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == StreamState::Done {
                return None;
            }
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!("decode cancelled at byte {}", self.offset);
                    self.finish();
                    return None;
                }
            }
            if !self.offset_applied {
                self.offset_applied = true;
                let target = self.settings.get_bytes_offset();
                if target > 0 {
                    match self.discard(target as usize) {
                        ReadOutcome::Full => self.offset = target,
                        ReadOutcome::Eof | ReadOutcome::Partial(_) => {
                            self.finish();
                            return Some(Err(IspError::UnexpectedEof {
                                needed: target as usize * 8,
                                available: 0,
                            }));
                        }
                        ReadOutcome::Failed(e) => {
                            self.finish();
                            return Some(Err(e.into()));
                        }
                    }
                }
            }
            if let Some(max) = self.settings.get_max_count() {
                if self.emitted >= max {
                    debug!("record count limit of {} reached", max);
                    self.finish();
                    return None;
                }
            }

            // Primary header.
            let packet_offset = self.offset;
            let mut ph_bytes = [0u8; PRIMARY_HEADER_LEN];
            match self.fill(&mut ph_bytes) {
                ReadOutcome::Full => {}
                ReadOutcome::Eof => {
                    self.finish();
                    return None;
                }
                ReadOutcome::Partial(n) => {
                    self.finish();
                    return Some(Err(self.truncation(packet_offset, PRIMARY_HEADER_LEN - n)));
                }
                ReadOutcome::Failed(e) => {
                    self.finish();
                    return Some(Err(e.into()));
                }
            }
            self.offset += PRIMARY_HEADER_LEN as u64;
            let primary = match PrimaryHeader::from_bytes(&ph_bytes) {
                Ok(header) => header,
                Err(e) => {
                    self.finish();
                    return Some(Err(e));
                }
            };

            let mut sanity_error = primary.validate(packet_offset as usize).err();
            if sanity_error.is_some()
                && self.settings.get_invalid_packet_policy() == InvalidPacketPolicy::Resync
            {
                warn!(
                    "{}; scanning for the next plausible packet",
                    sanity_error.as_ref().map(|e| e.to_string()).unwrap_or_default()
                );
                // The six header bytes rejoin the scan window.
                for &byte in ph_bytes.iter().rev() {
                    self.pending.push_front(byte);
                }
                self.offset -= PRIMARY_HEADER_LEN as u64;
                match self.resync() {
                    Ok(true) => continue,
                    Ok(false) => {
                        self.finish();
                        return None;
                    }
                    Err(e) => {
                        self.finish();
                        return Some(Err(e));
                    }
                }
            }

            let body_len = primary.packet_data_length as usize + 1;

            // Scanning state: step over skipped packets on headers alone.
            if self.state == StreamState::Scanning {
                match self.discard(body_len) {
                    ReadOutcome::Full => {}
                    ReadOutcome::Eof | ReadOutcome::Partial(_) => {
                        self.finish();
                        return Some(Err(self.truncation(packet_offset, body_len)));
                    }
                    ReadOutcome::Failed(e) => {
                        self.finish();
                        return Some(Err(e.into()));
                    }
                }
                self.offset += body_len as u64;
                self.packets_seen += 1;
                self.packets_skipped += 1;
                if self.packets_skipped >= self.settings.get_skip_packets() {
                    self.state = StreamState::Decoding;
                }
                continue;
            }

            // Secondary header.
            let mut sh_bytes = [0u8; SECONDARY_HEADER_LEN];
            match self.fill(&mut sh_bytes) {
                ReadOutcome::Full => {}
                ReadOutcome::Eof | ReadOutcome::Partial(_) => {
                    self.finish();
                    return Some(Err(self.truncation(packet_offset, SECONDARY_HEADER_LEN)));
                }
                ReadOutcome::Failed(e) => {
                    self.finish();
                    return Some(Err(e.into()));
                }
            }
            self.offset += SECONDARY_HEADER_LEN as u64;
            let secondary = match SecondaryHeader::from_bytes(&sh_bytes) {
                Ok(header) => header,
                Err(e) => {
                    self.finish();
                    return Some(Err(e));
                }
            };
            if sanity_error.is_none() {
                sanity_error = secondary.validate(packet_offset as usize).err();
            }
            if sanity_error.is_none() && body_len < SECONDARY_HEADER_LEN {
                sanity_error = Some(IspError::InvalidPacket {
                    reason: format!(
                        "packet data length {} cannot hold the secondary header",
                        body_len
                    ),
                    offset: packet_offset as usize,
                });
            }

            // User data field.
            let udf_len = body_len.saturating_sub(SECONDARY_HEADER_LEN);
            let mut udf_error = None;
            let user_data = match self.settings.get_user_data_mode() {
                UserDataMode::None => {
                    match self.discard(udf_len) {
                        ReadOutcome::Full => {}
                        ReadOutcome::Eof | ReadOutcome::Partial(_) => {
                            self.finish();
                            return Some(Err(self.truncation(packet_offset, udf_len)));
                        }
                        ReadOutcome::Failed(e) => {
                            self.finish();
                            return Some(Err(e.into()));
                        }
                    }
                    None
                }
                mode => {
                    let mut raw = vec![0u8; udf_len];
                    match self.fill(&mut raw) {
                        ReadOutcome::Full => {}
                        ReadOutcome::Eof | ReadOutcome::Partial(_) => {
                            self.finish();
                            return Some(Err(self.truncation(packet_offset, udf_len)));
                        }
                        ReadOutcome::Failed(e) => {
                            self.finish();
                            return Some(Err(e.into()));
                        }
                    }
                    if mode == UserDataMode::Extract {
                        Some(UserData::Raw(raw))
                    } else {
                        match udf::decode_user_data(&raw, &secondary) {
                            Ok(samples) => Some(UserData::Samples(samples)),
                            Err(e) => {
                                udf_error = Some(e);
                                None
                            }
                        }
                    }
                }
            };
            self.offset += udf_len as u64;
            self.packets_seen += 1;
            self.emitted += 1;

            self.subcom.push(
                secondary.sub_commutation.data_word_index,
                secondary.sub_commutation.data_word,
                secondary.counters.pri_count,
            );

            let halt = sanity_error.is_some()
                && self.settings.get_invalid_packet_policy() == InvalidPacketPolicy::Halt;
            let record = StreamedIsp {
                primary_header: primary,
                secondary_header: secondary,
                byte_offset: packet_offset,
                user_data,
                error: sanity_error.or(udf_error),
            };
            if halt {
                self.finish();
            }
            return Some(Ok(record));
        }
    }
}
