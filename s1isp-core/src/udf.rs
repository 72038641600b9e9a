//! This submodule turns the user data field of a packet back into complex
//! radar samples.
//!
//! The field holds four sample channels in acquisition order IE, IO, QE, QO
//! (even and odd indexed samples of the I and Q rails), each zero padded to
//! a 16-bit word boundary. How the channels are coded depends on the BAQ
//! mode and the test mode: raw 10-bit codes (bypass), fixed-width
//! signed-magnitude codes (BAQ 3/4/5 bit) or Huffman coded blocks with per
//! block rate and threshold headers (FDBAQ).
use num_complex::Complex32;

use crate::bitreader::BitReader;
use crate::enums::BaqMode;
use crate::errors::*;
use crate::header_structs::SecondaryHeader;
use crate::huffman;
use crate::reconstruction::{baq_sample_value, bypass_sample_value, fdbaq_sample_value};

/// FDBAQ rate and threshold headers apply to blocks of 128 samples.
pub const FDBAQ_BLOCK_LEN: usize = 128;

/// The user data of one packet, as requested through the decode settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserData {
    /// The raw user data field bytes, unparsed.
    Raw(Vec<u8>),
    /// The decoded complex sample sequence, in acquisition order.
    Samples(Vec<Complex32>),
}

impl UserData {
    /// The decoded samples, if this user data was decoded.
    pub fn samples(&self) -> Option<&[Complex32]> {
        match self {
            UserData::Samples(s) => Some(s),
            UserData::Raw(_) => None,
        }
    }

    /// The raw bytes, if this user data was merely extracted.
    pub fn raw(&self) -> Option<&[u8]> {
        match self {
            UserData::Raw(b) => Some(b),
            UserData::Samples(_) => None,
        }
    }
}

/// Decode the user data field of a packet into complex samples, dispatching
/// on the secondary header's BAQ mode and test mode.
///
/// An empty sample count yields an empty sequence; a BAQ mode with no
/// decoding pipeline yields [`IspError::UnsupportedBaqMode`].
pub fn decode_user_data(data: &[u8], header: &SecondaryHeader) -> Result<Vec<Complex32>, IspError> {
    let num_quads = header.sample_count.number_of_quads as usize;
    if num_quads == 0 {
        return Ok(Vec::new());
    }
    let baq_mode = header.radar_config.baq_mode;
    if baq_mode == BaqMode::Bypass || header.fixed_ancillary.test_mode.bypasses_compression() {
        decode_bypass(data, num_quads)
    } else if baq_mode.is_fdbaq() {
        decode_fdbaq(data, num_quads)
    } else if baq_mode.bits_per_code().is_some() {
        decode_baq(data, num_quads, baq_mode)
    } else {
        Err(IspError::UnsupportedBaqMode {
            code: baq_mode.code(),
        })
    }
}

/// Decode an uncompressed user data field: 10-bit signed-magnitude codes.
pub fn decode_bypass(data: &[u8], num_quads: usize) -> Result<Vec<Complex32>, IspError> {
    let mut r = BitReader::new(data);
    let mut channels: [Vec<f32>; 4] = Default::default();
    for channel in channels.iter_mut() {
        channel.reserve(num_quads);
        for _ in 0..num_quads {
            let code = r.read_u16(10)?;
            channel.push(bypass_sample_value(code));
        }
        r.align_to_word()?;
    }
    Ok(interleave(&channels))
}

/// Decode a fixed-rate BAQ user data field (3, 4 or 5 bits per sample).
///
/// The first channel opens with the packet's 8-bit threshold index; every
/// sample is a fixed-width signed-magnitude code.
pub fn decode_baq(data: &[u8], num_quads: usize, mode: BaqMode) -> Result<Vec<Complex32>, IspError> {
    let bits = mode
        .bits_per_code()
        .ok_or(IspError::UnsupportedBaqMode { code: mode.code() })?;
    let magnitude_mask = (1u8 << (bits - 1)) - 1;
    let mut r = BitReader::new(data);
    let mut thidx = 0u8;
    let mut channels: [Vec<f32>; 4] = Default::default();
    for (i, channel) in channels.iter_mut().enumerate() {
        if i == 0 {
            thidx = r.read_u8(8)?;
        }
        channel.reserve(num_quads);
        for _ in 0..num_quads {
            let code = r.read_u8(bits)?;
            let sign = code >> (bits - 1) != 0;
            let magnitude = code & magnitude_mask;
            channel.push(baq_sample_value(mode, thidx, sign, magnitude)?);
        }
        r.align_to_word()?;
    }
    Ok(interleave(&channels))
}

/// What an FDBAQ channel reads at the head of each 128-sample block.
#[derive(Clone, Copy, PartialEq)]
enum BlockHeader {
    /// IE: a 3-bit bit rate code.
    RateCode,
    /// QE: an 8-bit threshold index.
    ThresholdIndex,
    /// IO and QO: nothing, the IE rate codes apply.
    None,
}

/// Decode an FDBAQ user data field.
///
/// The bit rate codes are announced in the IE channel and the threshold
/// indices in the QE channel, so all four channels are parsed to
/// (sign, magnitude) pairs first and reconstructed to floats once both
/// header sequences are complete.
pub fn decode_fdbaq(data: &[u8], num_quads: usize) -> Result<Vec<Complex32>, IspError> {
    let mut r = BitReader::new(data);
    let mut brcs: Vec<u8> = Vec::new();
    let mut thidxs: Vec<u8> = Vec::new();

    let ie = parse_fdbaq_channel(&mut r, num_quads, BlockHeader::RateCode, &mut brcs, &mut thidxs)?;
    let io = parse_fdbaq_channel(&mut r, num_quads, BlockHeader::None, &mut brcs, &mut thidxs)?;
    let qe = parse_fdbaq_channel(
        &mut r,
        num_quads,
        BlockHeader::ThresholdIndex,
        &mut brcs,
        &mut thidxs,
    )?;
    let qo = parse_fdbaq_channel(&mut r, num_quads, BlockHeader::None, &mut brcs, &mut thidxs)?;

    let channels = [
        reconstruct_fdbaq_channel(&ie, &brcs, &thidxs)?,
        reconstruct_fdbaq_channel(&io, &brcs, &thidxs)?,
        reconstruct_fdbaq_channel(&qe, &brcs, &thidxs)?,
        reconstruct_fdbaq_channel(&qo, &brcs, &thidxs)?,
    ];
    Ok(interleave(&channels))
}

fn parse_fdbaq_channel(
    r: &mut BitReader,
    num_quads: usize,
    header: BlockHeader,
    brcs: &mut Vec<u8>,
    thidxs: &mut Vec<u8>,
) -> Result<Vec<(bool, u8)>, IspError> {
    let mut codes = Vec::with_capacity(num_quads);
    let mut block = 0usize;
    while codes.len() < num_quads {
        let block_len = FDBAQ_BLOCK_LEN.min(num_quads - codes.len());
        let brc = match header {
            BlockHeader::RateCode => {
                let value = r.read_u8(3)?;
                if value > 4 {
                    return Err(IspError::InvalidBrc { value });
                }
                brcs.push(value);
                value
            }
            BlockHeader::ThresholdIndex => {
                thidxs.push(r.read_u8(8)?);
                brcs[block]
            }
            BlockHeader::None => brcs[block],
        };
        for _ in 0..block_len {
            codes.push(huffman::decode_sample(r, brc)?);
        }
        block += 1;
    }
    r.align_to_word()?;
    Ok(codes)
}

fn reconstruct_fdbaq_channel(
    codes: &[(bool, u8)],
    brcs: &[u8],
    thidxs: &[u8],
) -> Result<Vec<f32>, IspError> {
    let mut out = Vec::with_capacity(codes.len());
    for (block, chunk) in codes.chunks(FDBAQ_BLOCK_LEN).enumerate() {
        let brc = brcs[block];
        let thidx = thidxs[block];
        for &(sign, magnitude) in chunk {
            out.push(fdbaq_sample_value(brc, thidx, sign, magnitude)?);
        }
    }
    Ok(out)
}

/// Re-interleave the four channels into acquisition order:
/// `IE[0]+jQE[0], IO[0]+jQO[0], IE[1]+jQE[1], ...`
fn interleave(channels: &[Vec<f32>; 4]) -> Vec<Complex32> {
    let [ie, io, qe, qo] = channels;
    let mut samples = Vec::with_capacity(ie.len() * 2);
    for i in 0..ie.len() {
        samples.push(Complex32::new(ie[i], qe[i]));
        samples.push(Complex32::new(io[i], qo[i]));
    }
    samples
}
