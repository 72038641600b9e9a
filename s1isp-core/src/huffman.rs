//! Huffman decoding for the flexible dynamic BAQ sample stream.
//!
//! Each of the five bit rate codes selects a fixed tree from the downlink
//! specification. Every sample is one sign bit followed by a variable-length
//! magnitude codeword, and the trees are all left-deep chains (a zero bit
//! always terminates earlier than a one bit at equal depth), so the walkers
//! are written as hand-coded conditionals rather than table lookups. This
//! sits in the innermost decoding loop and runs over megabytes of bits per
//! second of telemetry.
use crate::bitreader::BitReader;
use crate::errors::*;

/// The largest magnitude code of each tree, indexed by bit rate code.
pub const MAX_MAGNITUDE: [u8; 5] = [3, 4, 6, 9, 15];

/// Decode one sample with the tree for `brc`, returning (sign, magnitude).
///
/// The sign bit comes first on the wire; a set sign bit means negative.
/// Magnitude and sign stay separate so that the double zero (+0, -0) of the
/// signed-magnitude code space survives decoding.
#[inline]
pub fn decode_sample(r: &mut BitReader, brc: u8) -> Result<(bool, u8), IspError> {
    let sign = r.read_bit()?;
    let magnitude = match brc {
        0 => decode_magnitude_brc0(r)?,
        1 => decode_magnitude_brc1(r)?,
        2 => decode_magnitude_brc2(r)?,
        3 => decode_magnitude_brc3(r)?,
        4 => decode_magnitude_brc4(r)?,
        value => return Err(IspError::InvalidBrc { value }),
    };
    Ok((sign, magnitude))
}

/// Fold (sign, magnitude) into the flat signed-magnitude code space
/// `[+0..+max, -0..-max]` -> `[0..max, max+1..2*max+1]` used by the
/// reconstruction tables.
#[inline]
pub fn fold_sample_code(brc: u8, sign: bool, magnitude: u8) -> u8 {
    if sign {
        MAX_MAGNITUDE[brc as usize] + 1 + magnitude
    } else {
        magnitude
    }
}

fn decode_magnitude_brc0(r: &mut BitReader) -> Result<u8, IspError> {
    // 0 -> 0, 10 -> 1, 110 -> 2, 111 -> 3
    if !r.read_bit()? {
        return Ok(0);
    }
    if !r.read_bit()? {
        return Ok(1);
    }
    Ok(if !r.read_bit()? { 2 } else { 3 })
}

fn decode_magnitude_brc1(r: &mut BitReader) -> Result<u8, IspError> {
    // 0 -> 0, 10 -> 1, 110 -> 2, 1110 -> 3, 1111 -> 4
    for magnitude in 0..3 {
        if !r.read_bit()? {
            return Ok(magnitude);
        }
    }
    Ok(if !r.read_bit()? { 3 } else { 4 })
}

fn decode_magnitude_brc2(r: &mut BitReader) -> Result<u8, IspError> {
    // 0 -> 0, 10 -> 1, ..., 111110 -> 5, 111111 -> 6
    for magnitude in 0..5 {
        if !r.read_bit()? {
            return Ok(magnitude);
        }
    }
    Ok(if !r.read_bit()? { 5 } else { 6 })
}

fn decode_magnitude_brc3(r: &mut BitReader) -> Result<u8, IspError> {
    // Two-bit root: 00 -> 0, 01 -> 1, 10 -> 2, then a chain up to
    // 11111110 -> 8, 11111111 -> 9.
    if !r.read_bit()? {
        return Ok(if !r.read_bit()? { 0 } else { 1 });
    }
    if !r.read_bit()? {
        return Ok(2);
    }
    for magnitude in 3..8 {
        if !r.read_bit()? {
            return Ok(magnitude);
        }
    }
    Ok(if !r.read_bit()? { 8 } else { 9 })
}

fn decode_magnitude_brc4(r: &mut BitReader) -> Result<u8, IspError> {
    // 00 -> 0, 010 -> 1, 011 -> 2, 100 -> 3, 101 -> 4, 1100 -> 5, 1101 -> 6,
    // 1110 -> 7, 11110 -> 8, 111110 -> 9, 11111100 -> 10, 11111101 -> 11,
    // 111111100 -> 12, ..., 111111111 -> 15.
    if !r.read_bit()? {
        if !r.read_bit()? {
            return Ok(0);
        }
        return Ok(if !r.read_bit()? { 1 } else { 2 });
    }
    if !r.read_bit()? {
        return Ok(if !r.read_bit()? { 3 } else { 4 });
    }
    if !r.read_bit()? {
        return Ok(if !r.read_bit()? { 5 } else { 6 });
    }
    if !r.read_bit()? {
        return Ok(7);
    }
    if !r.read_bit()? {
        return Ok(8);
    }
    if !r.read_bit()? {
        return Ok(9);
    }
    if !r.read_bit()? {
        return Ok(if !r.read_bit()? { 10 } else { 11 });
    }
    if !r.read_bit()? {
        return Ok(if !r.read_bit()? { 12 } else { 13 });
    }
    Ok(if !r.read_bit()? { 14 } else { 15 })
}
