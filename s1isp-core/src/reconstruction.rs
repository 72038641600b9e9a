//! Sample value reconstruction for the compressed user data modes.
//!
//! The block adaptive modes transmit small signed-magnitude codes plus a
//! per-packet (BAQ) or per-block (FDBAQ) threshold index. Turning a code
//! back into a float follows one of two laws from the downlink
//! specification: below the threshold break point the "simple" method
//! (the magnitude is the value, with a tabulated top value), above it the
//! normalised law `NRL[magnitude] * SF[threshold]`. All tables are compiled
//! in as consts since the lookups sit in the inner decoding loop.
use crate::enums::BaqMode;
use crate::errors::*;

// Simple-method values of the top magnitude code, per threshold index.
const B_BRC0: [f32; 4] = [3.0, 3.0, 3.16, 3.53];
const B_BRC1: [f32; 4] = [4.0, 4.0, 4.08, 4.37];
const B_BRC2: [f32; 6] = [6.0, 6.0, 6.0, 6.15, 6.5, 6.88];
const B_BRC3: [f32; 7] = [9.0, 9.0, 9.0, 9.0, 9.16, 9.38, 9.61];
const B_BRC4: [f32; 9] = [15.0, 15.0, 15.0, 15.0, 15.0, 15.0, 15.22, 15.5, 15.78];

// Normalised reconstruction levels, per magnitude code.
const NRL_BRC0: [f32; 4] = [0.3637, 1.0915, 1.8208, 2.6406];
const NRL_BRC1: [f32; 5] = [0.3042, 0.9127, 1.5216, 2.1313, 2.8426];
const NRL_BRC2: [f32; 7] = [0.2305, 0.6916, 1.1528, 1.6140, 2.0754, 2.5369, 3.1191];
const NRL_BRC3: [f32; 10] = [
    0.1702, 0.5107, 0.8511, 1.1916, 1.5321, 1.8726, 2.2131, 2.5536, 2.8942, 3.3744,
];
const NRL_BRC4: [f32; 16] = [
    0.1130, 0.3389, 0.5649, 0.7908, 1.0167, 1.2428, 1.4687, 1.6947, 1.9206, 2.1466, 2.3725,
    2.5985, 2.8244, 3.0504, 3.2764, 3.6623,
];

// Normalised reconstruction levels of the 16-level fixed quantizer used by
// the 4-bit BAQ mode (optimal Gaussian reconstruction levels).
const NRL_BAQ4: [f32; 8] = [
    0.1284, 0.3881, 0.6568, 0.9424, 1.2562, 1.6181, 2.0690, 2.7326,
];
const B_BAQ4: [f32; 4] = [7.0, 7.0, 7.16, 7.53];

/// Sigma factor table: the standard deviation estimate selected by the
/// 8-bit threshold index.
#[rustfmt::skip]
pub const SIGMA_FACTORS: [f32; 256] = [
    0.0, 0.63, 1.25, 1.88, 2.51, 3.13, 3.76, 4.39, 5.01, 5.64, 6.27, 6.89, 7.52, 8.15, 8.77, 9.40,
    10.03, 10.65, 11.28, 11.91, 12.53, 13.16, 13.79, 14.41, 15.04, 15.67, 16.29, 16.92, 17.55,
    18.17, 18.80, 19.43, 20.05, 20.68, 21.31, 21.93, 22.56, 23.19, 23.81, 24.44, 25.07, 25.69,
    26.32, 26.95, 27.57, 28.20, 28.83, 29.45, 30.08, 30.71, 31.33, 31.96, 32.59, 33.21, 33.84,
    34.47, 35.09, 35.72, 36.35, 36.97, 37.60, 38.23, 38.85, 39.48, 40.11, 40.73, 41.36, 41.99,
    42.61, 43.24, 43.87, 44.49, 45.12, 45.75, 46.37, 47.00, 47.63, 48.25, 48.88, 49.51, 50.13,
    50.76, 51.39, 52.01, 52.64, 53.27, 53.89, 54.52, 55.15, 55.77, 56.40, 57.03, 57.65, 58.28,
    58.91, 59.53, 60.16, 60.79, 61.41, 62.04, 62.98, 64.24, 65.49, 66.74, 68.00, 69.25, 70.50,
    71.76, 73.01, 74.26, 75.52, 76.77, 78.02, 79.28, 80.53, 81.78, 83.04, 84.29, 85.54, 86.80,
    88.05, 89.30, 90.56, 91.81, 93.06, 94.32, 95.57, 96.82, 98.08, 99.33, 100.58, 101.84, 103.09,
    104.34, 105.60, 106.85, 108.10, 109.35, 110.61, 111.86, 113.11, 114.37, 115.62, 116.87,
    118.13, 119.38, 120.63, 121.89, 123.14, 124.39, 125.65, 126.90, 128.15, 129.41, 130.66,
    131.91, 133.17, 134.42, 135.67, 136.93, 138.18, 139.43, 140.69, 141.94, 143.19, 144.45,
    145.70, 146.95, 148.21, 149.46, 150.71, 151.97, 153.22, 154.47, 155.73, 156.98, 158.23,
    159.49, 160.74, 161.99, 163.25, 164.50, 165.75, 167.01, 168.26, 169.51, 170.77, 172.02,
    173.27, 174.53, 175.78, 177.03, 178.29, 179.54, 180.79, 182.05, 183.30, 184.55, 185.81,
    187.06, 188.31, 189.57, 190.82, 192.07, 193.33, 194.58, 195.83, 197.09, 198.34, 199.59,
    200.85, 202.10, 203.35, 204.61, 205.86, 207.11, 208.37, 209.62, 210.87, 212.13, 213.38,
    214.63, 215.89, 217.14, 218.39, 219.65, 220.90, 222.15, 223.41, 224.66, 225.91, 227.17,
    228.42, 229.67, 230.93, 232.18, 233.43, 234.69, 235.94, 237.19, 238.45, 239.70, 240.95,
    242.21, 243.46, 244.71, 245.97, 247.22, 248.47, 249.73, 250.98, 252.23, 253.49, 254.74,
    255.99, 255.99,
];

/// The threshold index up to which the simple method applies, per bit rate
/// code. Above it the code is a normalised reconstruction level.
const SIMPLE_METHOD_MAX_THIDX: [u8; 5] = [3, 3, 5, 6, 8];

/// Reconstruct the unsigned value of an FDBAQ magnitude code.
///
/// `InvalidCode` flags a magnitude outside the code space of the tree,
/// which can only come from a decoder bug or a corrupted reconstruction
/// pass, never from the Huffman walkers themselves.
pub fn fdbaq_magnitude_value(brc: u8, thidx: u8, magnitude: u8) -> Result<f32, IspError> {
    let (b, nrl) = match brc {
        0 => (&B_BRC0[..], &NRL_BRC0[..]),
        1 => (&B_BRC1[..], &NRL_BRC1[..]),
        2 => (&B_BRC2[..], &NRL_BRC2[..]),
        3 => (&B_BRC3[..], &NRL_BRC3[..]),
        4 => (&B_BRC4[..], &NRL_BRC4[..]),
        value => return Err(IspError::InvalidBrc { value }),
    };
    let max_magnitude = nrl.len() - 1;
    if magnitude as usize > max_magnitude {
        return Err(IspError::InvalidCode {
            quantizer: format!("BRC{}", brc),
            code: magnitude,
        });
    }
    if thidx <= SIMPLE_METHOD_MAX_THIDX[brc as usize] {
        if (magnitude as usize) < max_magnitude {
            Ok(f32::from(magnitude))
        } else {
            Ok(b[thidx as usize])
        }
    } else {
        Ok(nrl[magnitude as usize] * SIGMA_FACTORS[thidx as usize])
    }
}

/// Reconstruct a full FDBAQ sample from its sign and magnitude.
#[inline]
pub fn fdbaq_sample_value(brc: u8, thidx: u8, sign: bool, magnitude: u8) -> Result<f32, IspError> {
    let value = fdbaq_magnitude_value(brc, thidx, magnitude)?;
    Ok(if sign { -value } else { value })
}

/// Reconstruct the unsigned value of a fixed-rate BAQ magnitude code.
///
/// The 3-bit and 5-bit quantizers share their code spaces with the FDBAQ
/// bit rate codes 0 and 4 and reuse those tables; the 4-bit quantizer has
/// its own 16-level tables.
pub fn baq_magnitude_value(mode: BaqMode, thidx: u8, magnitude: u8) -> Result<f32, IspError> {
    let (b, nrl, simple_max_thidx) = match mode {
        BaqMode::Baq3Bit => (&B_BRC0[..], &NRL_BRC0[..], SIMPLE_METHOD_MAX_THIDX[0]),
        BaqMode::Baq4Bit => (&B_BAQ4[..], &NRL_BAQ4[..], 3),
        BaqMode::Baq5Bit => (&B_BRC4[..], &NRL_BRC4[..], SIMPLE_METHOD_MAX_THIDX[4]),
        other => {
            return Err(IspError::UnsupportedBaqMode { code: other.code() });
        }
    };
    let max_magnitude = nrl.len() - 1;
    if magnitude as usize > max_magnitude {
        return Err(IspError::InvalidCode {
            quantizer: mode.to_string(),
            code: magnitude,
        });
    }
    if thidx <= simple_max_thidx {
        if (magnitude as usize) < max_magnitude {
            Ok(f32::from(magnitude))
        } else {
            Ok(b[thidx as usize])
        }
    } else {
        Ok(nrl[magnitude as usize] * SIGMA_FACTORS[thidx as usize])
    }
}

/// Reconstruct a full fixed-rate BAQ sample from its sign and magnitude.
#[inline]
pub fn baq_sample_value(mode: BaqMode, thidx: u8, sign: bool, magnitude: u8) -> Result<f32, IspError> {
    let value = baq_magnitude_value(mode, thidx, magnitude)?;
    Ok(if sign { -value } else { value })
}

/// Convert a 10-bit signed-magnitude bypass code to a float.
///
/// The most significant of the ten bits is the sign, the low nine bits the
/// magnitude 0..=511.
/// ```
/// # use s1isp_core::reconstruction::bypass_sample_value;
/// assert_eq!(bypass_sample_value(0b01_1111_1111), 511.0);
/// assert_eq!(bypass_sample_value(0b10_0000_0011), -3.0);
/// assert_eq!(bypass_sample_value(0b10_0000_0000), -0.0);
/// ```
#[inline]
pub fn bypass_sample_value(code: u16) -> f32 {
    let magnitude = f32::from(code & 0x1FF);
    if code & 0x200 != 0 {
        -magnitude
    } else {
        magnitude
    }
}
