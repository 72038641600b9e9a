//! This contains all the enums that are used in the secondary header.
//!
//! The instrument source packet headers are dense with coded fields which may
//! only take values from closed sets defined by the downlink specification,
//! which lends itself well to being represented by enums.
//!
//! As a general rule every enum here keeps a sentinel `Unknown` variant
//! carrying the raw code. Flight telemetry does contain reserved-but-used
//! codes, so decoding never fails on an unlisted value; the original code can
//! always be recovered through `code()` and round-trips through re-encoding.
#[cfg(any(feature = "to_json", feature = "serde"))]
use serde::{Deserialize, Serialize};

use crate::F_REF_HZ;

/// Event Control Code: the instrument operating mode of the data take.
///
/// From byte 14 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum EccNumber {
    Contingency,
    Stripmap1,
    Stripmap2,
    Stripmap3,
    Stripmap4,
    Stripmap5North,
    Stripmap6,
    ExtraWideSwath,
    InterferometricWideSwath,
    WaveMode,
    Stripmap5South,
    Stripmap1NoInterlCal,
    Stripmap2NoInterlCal,
    Stripmap3NoInterlCal,
    Stripmap4NoInterlCal,
    RfCharacterisation,
    TestModeOperBypass,
    ElevationNotchS3,
    AzimuthNotchS1,
    AzimuthNotchS2,
    AzimuthNotchS3,
    AzimuthNotchS4,
    AzimuthNotchS5North,
    AzimuthNotchS5South,
    AzimuthNotchS6,
    Stripmap5NorthNoInterlCal,
    Stripmap5SouthNoInterlCal,
    Stripmap6NoInterlCal,
    ElevationNotchS3NoInterlCal,
    AzimuthNotchS1NoInterlCal,
    AzimuthNotchS3NoInterlCal,
    AzimuthNotchS6NoInterlCal,
    NoiseCharacterisationS1,
    NoiseCharacterisationS2,
    NoiseCharacterisationS3,
    NoiseCharacterisationS4,
    NoiseCharacterisationS5North,
    NoiseCharacterisationS5South,
    NoiseCharacterisationS6,
    NoiseCharacterisationEws,
    NoiseCharacterisationIws,
    NoiseCharacterisationWave,
    Unknown(u8),
}

impl EccNumber {
    pub fn from_code(source: u8) -> Self {
        use self::EccNumber::*;
        match source {
            0 => Contingency,
            1 => Stripmap1,
            2 => Stripmap2,
            3 => Stripmap3,
            4 => Stripmap4,
            5 => Stripmap5North,
            6 => Stripmap6,
            7 => ExtraWideSwath,
            8 => InterferometricWideSwath,
            9 => WaveMode,
            10 => Stripmap5South,
            11 => Stripmap1NoInterlCal,
            12 => Stripmap2NoInterlCal,
            13 => Stripmap3NoInterlCal,
            14 => Stripmap4NoInterlCal,
            15 => RfCharacterisation,
            16 => TestModeOperBypass,
            17 => ElevationNotchS3,
            18 => AzimuthNotchS1,
            19 => AzimuthNotchS2,
            20 => AzimuthNotchS3,
            21 => AzimuthNotchS4,
            22 => AzimuthNotchS5North,
            23 => AzimuthNotchS5South,
            24 => AzimuthNotchS6,
            25 => Stripmap5NorthNoInterlCal,
            26 => Stripmap5SouthNoInterlCal,
            27 => Stripmap6NoInterlCal,
            28 => ElevationNotchS3NoInterlCal,
            29 => AzimuthNotchS1NoInterlCal,
            30 => AzimuthNotchS3NoInterlCal,
            31 => AzimuthNotchS6NoInterlCal,
            32 => NoiseCharacterisationS1,
            33 => NoiseCharacterisationS2,
            34 => NoiseCharacterisationS3,
            35 => NoiseCharacterisationS4,
            36 => NoiseCharacterisationS5North,
            37 => NoiseCharacterisationS5South,
            38 => NoiseCharacterisationS6,
            39 => NoiseCharacterisationEws,
            40 => NoiseCharacterisationIws,
            41 => NoiseCharacterisationWave,
            u => Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        use self::EccNumber::*;
        match self {
            Contingency => 0,
            Stripmap1 => 1,
            Stripmap2 => 2,
            Stripmap3 => 3,
            Stripmap4 => 4,
            Stripmap5North => 5,
            Stripmap6 => 6,
            ExtraWideSwath => 7,
            InterferometricWideSwath => 8,
            WaveMode => 9,
            Stripmap5South => 10,
            Stripmap1NoInterlCal => 11,
            Stripmap2NoInterlCal => 12,
            Stripmap3NoInterlCal => 13,
            Stripmap4NoInterlCal => 14,
            RfCharacterisation => 15,
            TestModeOperBypass => 16,
            ElevationNotchS3 => 17,
            AzimuthNotchS1 => 18,
            AzimuthNotchS2 => 19,
            AzimuthNotchS3 => 20,
            AzimuthNotchS4 => 21,
            AzimuthNotchS5North => 22,
            AzimuthNotchS5South => 23,
            AzimuthNotchS6 => 24,
            Stripmap5NorthNoInterlCal => 25,
            Stripmap5SouthNoInterlCal => 26,
            Stripmap6NoInterlCal => 27,
            ElevationNotchS3NoInterlCal => 28,
            AzimuthNotchS1NoInterlCal => 29,
            AzimuthNotchS3NoInterlCal => 30,
            AzimuthNotchS6NoInterlCal => 31,
            NoiseCharacterisationS1 => 32,
            NoiseCharacterisationS2 => 33,
            NoiseCharacterisationS3 => 34,
            NoiseCharacterisationS4 => 35,
            NoiseCharacterisationS5North => 36,
            NoiseCharacterisationS5South => 37,
            NoiseCharacterisationS6 => 38,
            NoiseCharacterisationEws => 39,
            NoiseCharacterisationIws => 40,
            NoiseCharacterisationWave => 41,
            Unknown(u) => u,
        }
    }
}

impl std::fmt::Display for EccNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// From bits 1-3 of byte 15 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum TestMode {
    Default,
    ContingencyRxmFullyOperational,
    ContingencyRxmNotOperational,
    Oper,
    Bypass,
    Unknown(u8),
}

impl TestMode {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::Default,
            4 => Self::ContingencyRxmFullyOperational,
            5 => Self::ContingencyRxmNotOperational,
            6 => Self::Oper,
            7 => Self::Bypass,
            u => Self::Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::ContingencyRxmFullyOperational => 4,
            Self::ContingencyRxmNotOperational => 5,
            Self::Oper => 6,
            Self::Bypass => 7,
            Self::Unknown(u) => u,
        }
    }

    /// In the `Bypass` test mode the sample data bypasses the onboard
    /// compression regardless of the commanded BAQ mode.
    pub fn bypasses_compression(self) -> bool {
        matches!(self, Self::Bypass)
    }
}

impl std::fmt::Display for TestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// From bits 4-7 of byte 15 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum RxChannelId {
    RxV,
    RxH,
    Unknown(u8),
}

impl RxChannelId {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::RxV,
            1 => Self::RxH,
            u => Self::Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::RxV => 0,
            Self::RxH => 1,
            Self::Unknown(u) => u,
        }
    }
}

impl std::fmt::Display for RxChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// The onboard compression applied to the radar samples.
///
/// From bits 3-7 of byte 31 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum BaqMode {
    Bypass,
    Baq3Bit,
    Baq4Bit,
    Baq5Bit,
    Fdbaq0,
    Fdbaq1,
    Fdbaq2,
    Unknown(u8),
}

impl BaqMode {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::Bypass,
            3 => Self::Baq3Bit,
            4 => Self::Baq4Bit,
            5 => Self::Baq5Bit,
            12 => Self::Fdbaq0,
            13 => Self::Fdbaq1,
            14 => Self::Fdbaq2,
            u => Self::Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Bypass => 0,
            Self::Baq3Bit => 3,
            Self::Baq4Bit => 4,
            Self::Baq5Bit => 5,
            Self::Fdbaq0 => 12,
            Self::Fdbaq1 => 13,
            Self::Fdbaq2 => 14,
            Self::Unknown(u) => u,
        }
    }

    /// The fixed code width of the block adaptive modes.
    pub fn bits_per_code(self) -> Option<usize> {
        match self {
            Self::Baq3Bit => Some(3),
            Self::Baq4Bit => Some(4),
            Self::Baq5Bit => Some(5),
            _ => None,
        }
    }

    pub fn is_fdbaq(self) -> bool {
        matches!(self, Self::Fdbaq0 | Self::Fdbaq1 | Self::Fdbaq2)
    }
}

impl std::fmt::Display for BaqMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// The decimation filter selection for the receive window.
///
/// From byte 34 of the secondary header. Variants are named after the
/// decimation ratio they apply to the 4·F_REF analogue-to-digital sample
/// stream; code 2 is not assigned by the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum RangeDecimation {
    X3On4,
    X2On3,
    X5On9,
    X4On9,
    X3On8,
    X1On3,
    X1On6,
    X3On7,
    X5On16,
    X3On26,
    X4On11,
    Unknown(u8),
}

impl RangeDecimation {
    pub fn from_code(source: u8) -> Self {
        use self::RangeDecimation::*;
        match source {
            0 => X3On4,
            1 => X2On3,
            3 => X5On9,
            4 => X4On9,
            5 => X3On8,
            6 => X1On3,
            7 => X1On6,
            8 => X3On7,
            9 => X5On16,
            10 => X3On26,
            11 => X4On11,
            u => Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        use self::RangeDecimation::*;
        match self {
            X3On4 => 0,
            X2On3 => 1,
            X5On9 => 3,
            X4On9 => 4,
            X3On8 => 5,
            X1On3 => 6,
            X1On6 => 7,
            X3On7 => 8,
            X5On16 => 9,
            X3On26 => 10,
            X4On11 => 11,
            Unknown(u) => u,
        }
    }

    /// Decimation ratio as (numerator, denominator).
    pub fn decimation_ratio(self) -> Option<(u32, u32)> {
        use self::RangeDecimation::*;
        match self {
            X3On4 => Some((3, 4)),
            X2On3 => Some((2, 3)),
            X5On9 => Some((5, 9)),
            X4On9 => Some((4, 9)),
            X3On8 => Some((3, 8)),
            X1On3 => Some((1, 3)),
            X1On6 => Some((1, 6)),
            X3On7 => Some((3, 7)),
            X5On16 => Some((5, 16)),
            X3On26 => Some((3, 26)),
            X4On11 => Some((4, 11)),
            Unknown(_) => None,
        }
    }

    /// Length of the decimation filter in input samples.
    pub fn filter_length(self) -> Option<u32> {
        use self::RangeDecimation::*;
        match self {
            X3On4 => Some(28),
            X2On3 => Some(28),
            X5On9 => Some(32),
            X4On9 => Some(40),
            X3On8 => Some(48),
            X1On3 => Some(52),
            X1On6 => Some(92),
            X3On7 => Some(36),
            X5On16 => Some(68),
            X3On26 => Some(120),
            X4On11 => Some(44),
            Unknown(_) => None,
        }
    }

    /// The fixed range-line start offset of the filter output, in samples.
    pub fn filter_output_offset(self) -> Option<u32> {
        self.filter_length().map(|nf| 80 + nf / 4)
    }

    /// The decimated range sampling frequency in Hz.
    /// ```
    /// # use s1isp_core::enums::RangeDecimation;
    /// let fs = RangeDecimation::X3On7.sampling_frequency_hz();
    /// assert!((fs - 64.345e6).abs() < 1e4);
    /// ```
    pub fn sampling_frequency_hz(self) -> f64 {
        match self.decimation_ratio() {
            Some((num, den)) => 4.0 * F_REF_HZ * f64::from(num) / f64::from(den),
            None => f64::NAN,
        }
    }

    /// The per-code table of filter output counts for a partial input cycle.
    ///
    /// Entry `c` gives the number of output samples produced by `c` leftover
    /// input samples after the last complete decimation cycle, truncated
    /// toward zero.
    pub fn d_values(self) -> Option<&'static [u32]> {
        use self::RangeDecimation::*;
        const D_3_4: [u32; 4] = [0, 0, 1, 2];
        const D_2_3: [u32; 3] = [0, 0, 1];
        const D_5_9: [u32; 9] = [0, 0, 1, 1, 2, 2, 3, 3, 4];
        const D_4_9: [u32; 9] = [0, 0, 0, 1, 1, 2, 2, 3, 3];
        const D_3_8: [u32; 8] = [0, 0, 0, 1, 1, 1, 2, 2];
        const D_1_3: [u32; 3] = [0, 0, 0];
        const D_1_6: [u32; 6] = [0, 0, 0, 0, 0, 0];
        const D_3_7: [u32; 7] = [0, 0, 0, 1, 1, 2, 2];
        const D_5_16: [u32; 16] = [0, 0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];
        const D_3_26: [u32; 26] = [
            0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2,
        ];
        const D_4_11: [u32; 11] = [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3];
        match self {
            X3On4 => Some(&D_3_4),
            X2On3 => Some(&D_2_3),
            X5On9 => Some(&D_5_9),
            X4On9 => Some(&D_4_9),
            X3On8 => Some(&D_3_8),
            X1On3 => Some(&D_1_3),
            X1On6 => Some(&D_1_6),
            X3On7 => Some(&D_3_7),
            X5On16 => Some(&D_5_16),
            X3On26 => Some(&D_3_26),
            X4On11 => Some(&D_4_11),
            Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for RangeDecimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// Transmit/receive polarisation configuration of the antenna.
///
/// From bits 1-3 of byte 53 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum Polarization {
    TxH,
    TxHRxH,
    TxHRxV,
    TxHRxVH,
    TxV,
    TxVRxH,
    TxVRxV,
    TxVRxVH,
    Unknown(u8),
}

impl Polarization {
    pub fn from_code(source: u8) -> Self {
        use self::Polarization::*;
        match source {
            0 => TxH,
            1 => TxHRxH,
            2 => TxHRxV,
            3 => TxHRxVH,
            4 => TxV,
            5 => TxVRxH,
            6 => TxVRxV,
            7 => TxVRxVH,
            u => Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        use self::Polarization::*;
        match self {
            TxH => 0,
            TxHRxH => 1,
            TxHRxV => 2,
            TxHRxVH => 3,
            TxV => 4,
            TxVRxH => 5,
            TxVRxV => 6,
            TxVRxVH => 7,
            Unknown(u) => u,
        }
    }
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        use self::Polarization::*;
        let name = match self {
            TxH => "H",
            TxHRxH => "HH",
            TxHRxV => "HV",
            TxHRxVH => "HH/HV",
            TxV => "V",
            TxVRxH => "VH",
            TxVRxV => "VV",
            TxVRxVH => "VV/VH",
            Unknown(u) => return write!(f, "Unknown({})", u),
        };
        write!(f, "{}", name)
    }
}

/// Front-end/tile-amplifier temperature compensation state.
///
/// From bits 4-5 of byte 53 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum TemperatureCompensation {
    FeOffTaOff,
    FeOnTaOff,
    FeOffTaOn,
    FeOnTaOn,
    Unknown(u8),
}

impl TemperatureCompensation {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::FeOffTaOff,
            1 => Self::FeOnTaOff,
            2 => Self::FeOffTaOn,
            3 => Self::FeOnTaOn,
            u => Self::Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::FeOffTaOff => 0,
            Self::FeOnTaOff => 1,
            Self::FeOffTaOn => 2,
            Self::FeOnTaOn => 3,
            Self::Unknown(u) => u,
        }
    }
}

impl std::fmt::Display for TemperatureCompensation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// SAS test operation flag of a calibration message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum SasTest {
    Nominal,
    Test,
}

impl SasTest {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::Nominal,
            _ => Self::Test,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Nominal => 0,
            Self::Test => 1,
        }
    }
}

/// The calibration signal routing of a calibration message.
///
/// From bits 3-5 of byte 54 of the secondary header (calibration form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum CalType {
    TxCal,
    RxCal,
    EpdnCal,
    TaCal,
    ApdnCal,
    TxHCalIso,
    Unknown(u8),
}

impl CalType {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::TxCal,
            1 => Self::RxCal,
            2 => Self::EpdnCal,
            3 => Self::TaCal,
            4 => Self::ApdnCal,
            7 => Self::TxHCalIso,
            u => Self::Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::TxCal => 0,
            Self::RxCal => 1,
            Self::EpdnCal => 2,
            Self::TaCal => 3,
            Self::ApdnCal => 4,
            Self::TxHCalIso => 7,
            Self::Unknown(u) => u,
        }
    }
}

impl std::fmt::Display for CalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// PCC sequence arrangement during calibration.
///
/// From bits 0-1 of byte 56 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum CalMode {
    Pcc2Interleaved,
    Pcc2NonInterleaved,
    Unknown(u8),
}

impl CalMode {
    pub fn from_code(source: u8) -> Self {
        match source {
            0 => Self::Pcc2Interleaved,
            1 => Self::Pcc2NonInterleaved,
            u => Self::Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Pcc2Interleaved => 0,
            Self::Pcc2NonInterleaved => 1,
            Self::Unknown(u) => u,
        }
    }
}

impl std::fmt::Display for CalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// What the sampling window actually recorded.
///
/// From bits 0-3 of byte 57 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum SignalType {
    Echo,
    Noise,
    TxCal,
    RxCal,
    EpdnCal,
    TaCal,
    ApdnCal,
    TxHCalIso,
    Unknown(u8),
}

impl SignalType {
    pub fn from_code(source: u8) -> Self {
        use self::SignalType::*;
        match source {
            0 => Echo,
            1 => Noise,
            8 => TxCal,
            9 => RxCal,
            10 => EpdnCal,
            11 => TaCal,
            12 => ApdnCal,
            15 => TxHCalIso,
            u => Unknown(u),
        }
    }

    pub fn code(self) -> u8 {
        use self::SignalType::*;
        match self {
            Echo => 0,
            Noise => 1,
            TxCal => 8,
            RxCal => 9,
            EpdnCal => 10,
            TaCal => 11,
            ApdnCal => 12,
            TxHCalIso => 15,
            Unknown(u) => u,
        }
    }

    /// Calibration loop signals carry no scene energy.
    pub fn is_calibration(self) -> bool {
        use self::SignalType::*;
        matches!(self, TxCal | RxCal | EpdnCal | TaCal | ApdnCal | TxHCalIso)
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

/// The antenna swath of the sampling window, with its product name.
///
/// Unlike the other coded fields this one is open ended (new swath numbers
/// have appeared over the mission lifetime), so it wraps the raw byte and
/// offers the name as a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub struct SwathNumber(pub u8);

impl SwathNumber {
    pub fn code(self) -> u8 {
        self.0
    }

    /// The conventional swath name, if the number is assigned.
    /// ```
    /// # use s1isp_core::enums::SwathNumber;
    /// assert_eq!(SwathNumber(2).name(), Some("S3"));
    /// assert_eq!(SwathNumber(7).name(), Some("IW2"));
    /// assert_eq!(SwathNumber(200).name(), None);
    /// ```
    pub fn name(self) -> Option<&'static str> {
        const NAMES: [&str; 16] = [
            "S1", "S2", "S3", "S4", "S5", "S6", "IW1", "IW2", "IW3", "EW1", "EW2", "EW3", "EW4",
            "EW5", "WV1", "WV2",
        ];
        NAMES.get(self.0 as usize).copied()
    }
}

impl std::fmt::Display for SwathNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Swath({})", self.0),
        }
    }
}
