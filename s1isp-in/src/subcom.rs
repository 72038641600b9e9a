//! Re-assembly of the sub-commutated ancillary data.
//!
//! Each packet's secondary header carries one 16-bit word of a 64-slot
//! frame holding the slowly changing satellite state (ephemeris, attitude,
//! temperatures). The accumulator collects the per-packet
//! (`data_word_index`, `data_word`, `pri_count`) triples, closes a frame
//! when slots 1..=64 arrive in order, and decodes the resulting 128-byte
//! block into named fields.
use log::warn;

use s1isp_core::errors::IspError;

use std::convert::TryInto;

/// Slots per sub-commutation frame.
pub const FRAME_WORDS: usize = 64;
/// Bytes per complete frame.
pub const FRAME_BYTES: usize = 2 * FRAME_WORDS;

/// The largest PRI count step between two consecutive contributions that is
/// still treated as the same frame. One word arrives per pulse, so anything
/// larger means packets were lost in between.
pub const DEFAULT_MAX_PRI_GAP: u32 = 1;

/// The satellite state carried by one complete sub-commutation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentStatus {
    /// Antenna phase centre position in the Earth-fixed frame, metres.
    pub position_x_m: f64,
    pub position_y_m: f64,
    pub position_z_m: f64,
    /// Velocity in the Earth-fixed frame, metres per second.
    pub velocity_x_m_per_s: f32,
    pub velocity_y_m_per_s: f32,
    pub velocity_z_m_per_s: f32,
    /// GPS time stamp of the position/velocity solution.
    pub pod_data_stamp_coarse: u32,
    pub pod_data_stamp_fine: u16,
    /// Attitude quaternion, scalar first.
    pub quaternion_0: f32,
    pub quaternion_1: f32,
    pub quaternion_2: f32,
    pub quaternion_3: f32,
    /// Body angular rates, radians per second.
    pub angular_rate_x: f32,
    pub angular_rate_y: f32,
    pub angular_rate_z: f32,
    /// Time stamp of the attitude solution.
    pub attitude_data_stamp_coarse: u32,
    pub attitude_data_stamp_fine: u16,
    /// Raw front-end and tile amplifier temperature words.
    pub temperature_words: [u16; 24],
}

impl InstrumentStatus {
    /// Decode a complete 128-byte frame. Field offsets are fixed, all
    /// values big endian.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IspError> {
        if bytes.len() != FRAME_BYTES {
            return Err(IspError::UnexpectedEof {
                needed: FRAME_BYTES * 8,
                available: bytes.len() * 8,
            });
        }
        let f64_at = |i: usize| f64::from_be_bytes(bytes[i..i + 8].try_into().unwrap());
        let f32_at = |i: usize| f32::from_be_bytes(bytes[i..i + 4].try_into().unwrap());
        let u32_at = |i: usize| u32::from_be_bytes(bytes[i..i + 4].try_into().unwrap());
        let u16_at = |i: usize| u16::from_be_bytes(bytes[i..i + 2].try_into().unwrap());

        let mut temperature_words = [0u16; 24];
        for (w, word) in temperature_words.iter_mut().enumerate() {
            *word = u16_at(80 + 2 * w);
        }

        Ok(InstrumentStatus {
            position_x_m: f64_at(0),
            position_y_m: f64_at(8),
            position_z_m: f64_at(16),
            velocity_x_m_per_s: f32_at(24),
            velocity_y_m_per_s: f32_at(28),
            velocity_z_m_per_s: f32_at(32),
            pod_data_stamp_coarse: u32_at(36),
            pod_data_stamp_fine: u16_at(40),
            quaternion_0: f32_at(44),
            quaternion_1: f32_at(48),
            quaternion_2: f32_at(52),
            quaternion_3: f32_at(56),
            angular_rate_x: f32_at(60),
            angular_rate_y: f32_at(64),
            angular_rate_z: f32_at(68),
            attitude_data_stamp_coarse: u32_at(72),
            attitude_data_stamp_fine: u16_at(76),
            temperature_words,
        })
    }
}

/// One re-assembled sub-commutation frame, complete or not.
#[derive(Debug, Clone, PartialEq)]
pub struct AncillaryDataFrame {
    /// True when the frame was interrupted before slot 64.
    pub partial: bool,
    /// Number of slots that actually arrived.
    pub words_received: usize,
    /// PRI count of the first contributing packet.
    pub pri_count_first: u32,
    /// PRI count of the last contributing packet.
    pub pri_count_last: u32,
    /// The frame bytes; missing slots of a partial frame read as zero.
    pub raw: Vec<u8>,
    /// The decoded satellite state; only present on complete frames.
    pub status: Option<InstrumentStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AccumState {
    /// Waiting for a slot-1 word.
    Idle,
    /// Collecting slots of the current frame.
    Accumulating,
}

/// Accumulates sub-commutation words across consecutive packets of one
/// receive channel and emits frames as they close.
#[derive(Debug)]
pub struct SubcomAccumulator {
    state: AccumState,
    words: [u16; FRAME_WORDS],
    received: usize,
    /// The slot the next in-order word must carry.
    expected_index: u8,
    pri_first: u32,
    pri_last: u32,
    max_pri_gap: u32,
    frames: Vec<AncillaryDataFrame>,
}

impl Default for SubcomAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SubcomAccumulator {
    pub fn new() -> Self {
        SubcomAccumulator {
            state: AccumState::Idle,
            words: [0; FRAME_WORDS],
            received: 0,
            expected_index: 1,
            pri_first: 0,
            pri_last: 0,
            max_pri_gap: DEFAULT_MAX_PRI_GAP,
            frames: Vec::new(),
        }
    }

    /// Widen the tolerated PRI count step between contributions.
    pub fn with_max_pri_gap(mut self, gap: u32) -> Self {
        self.max_pri_gap = gap;
        self
    }

    /// Feed the sub-commutation triple of one packet.
    ///
    /// A slot-1 word always (re)starts a frame; whatever was being
    /// collected is emitted as partial first. An out-of-order slot or a
    /// PRI jump abandons the current frame the same way.
    pub fn push(&mut self, data_word_index: u8, data_word: u16, pri_count: u32) {
        if data_word_index == 0 {
            // The service is idle on this packet.
            return;
        }
        if data_word_index as usize > FRAME_WORDS {
            self.abandon("slot index out of range");
            return;
        }
        if data_word_index == 1 {
            if self.state == AccumState::Accumulating {
                self.abandon("restarted by a new slot-1 word");
            }
            self.words = [0; FRAME_WORDS];
            self.words[0] = data_word;
            self.received = 1;
            self.expected_index = 2;
            self.pri_first = pri_count;
            self.pri_last = pri_count;
            self.state = AccumState::Accumulating;
            return;
        }
        if self.state != AccumState::Accumulating {
            return;
        }
        if data_word_index != self.expected_index {
            self.abandon("slot index out of order");
            return;
        }
        if pri_count.wrapping_sub(self.pri_last) > self.max_pri_gap {
            self.abandon("PRI count gap");
            return;
        }
        self.words[data_word_index as usize - 1] = data_word;
        self.received += 1;
        self.expected_index += 1;
        self.pri_last = pri_count;
        if self.received == FRAME_WORDS {
            self.close_frame();
        }
    }

    /// Emit whatever is currently being collected as a partial frame.
    /// Called by the decoders once the packet stream ends.
    pub fn flush(&mut self) {
        if self.state == AccumState::Accumulating {
            self.abandon("stream ended");
        }
    }

    /// The frames emitted so far, in completion order.
    pub fn frames(&self) -> &[AncillaryDataFrame] {
        &self.frames
    }

    /// Take ownership of the emitted frames, leaving the accumulator empty.
    pub fn take_frames(&mut self) -> Vec<AncillaryDataFrame> {
        std::mem::take(&mut self.frames)
    }

    fn frame_bytes(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(FRAME_BYTES);
        for word in self.words.iter() {
            raw.extend_from_slice(&word.to_be_bytes());
        }
        raw
    }

    fn close_frame(&mut self) {
        let raw = self.frame_bytes();
        let status = InstrumentStatus::from_bytes(&raw).ok();
        self.frames.push(AncillaryDataFrame {
            partial: false,
            words_received: FRAME_WORDS,
            pri_count_first: self.pri_first,
            pri_count_last: self.pri_last,
            raw,
            status,
        });
        self.reset();
    }

    fn abandon(&mut self, reason: &str) {
        if self.state == AccumState::Accumulating && self.received > 0 {
            warn!(
                "sub-commutation frame abandoned after {} of {} slots: {}",
                self.received, FRAME_WORDS, reason
            );
            self.frames.push(AncillaryDataFrame {
                partial: true,
                words_received: self.received,
                pri_count_first: self.pri_first,
                pri_count_last: self.pri_last,
                raw: self.frame_bytes(),
                status: None,
            });
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = AccumState::Idle;
        self.words = [0; FRAME_WORDS];
        self.received = 0;
        self.expected_index = 1;
    }
}
