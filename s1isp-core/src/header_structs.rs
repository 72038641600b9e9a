//! This file contains the definitions for the packet headers of an
//! instrument source packet stream. These can then be used for better
//! interpreting the downlinked data in the parser.
//!
//! The secondary header is the concatenation of six services (datation,
//! fixed ancillary, sub-commutated ancillary, counters, radar configuration
//! support and radar sample count). The services are byte aligned against
//! each other but bit packed inside, so decoding runs a [`BitReader`] over
//! the whole 62-byte image with cursor asserts at every service boundary.
use crate::bitreader::BitReader;
use crate::enums::*;
use crate::errors::*;
use crate::{F_REF_HZ, F_REF_MHZ, PRIMARY_HEADER_LEN, SECONDARY_HEADER_LEN, SYNC_MARKER};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// This structure represents a parsed 6-byte packet primary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimaryHeader {
    /// Bits 0-2. Always 0 for this packet generation.
    pub version: u8,
    /// Bit 3. 0 = telemetry, 1 = telecommand.
    pub packet_type: u8,
    /// Bit 4. Always 1: every instrument packet carries a secondary header.
    pub secondary_header_flag: u8,
    /// Bits 5-11. Process identifier.
    pub pid: u8,
    /// Bits 12-15. Packet category.
    pub pcat: u8,
    /// Bits 16-17. Always 0b11 ("stand-alone packet").
    pub sequence_flags: u8,
    /// Bits 18-31. Wraps at 2^14.
    pub sequence_count: u16,
    /// Bits 32-47, as on the wire: the packet data field length minus one.
    pub packet_data_length: u16,
}

impl PrimaryHeader {
    /// Decode a primary header from exactly 6 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IspError> {
        if bytes.len() != PRIMARY_HEADER_LEN {
            return Err(IspError::PrimaryHeaderLength { l: bytes.len() });
        }
        let mut r = BitReader::new(bytes);
        let version = r.read_u8(3)?;
        let packet_type = r.read_u8(1)?;
        let secondary_header_flag = r.read_u8(1)?;
        let pid = r.read_u8(7)?;
        let pcat = r.read_u8(4)?;
        let sequence_flags = r.read_u8(2)?;
        let sequence_count = r.read_u16(14)?;
        let packet_data_length = r.read_u16(16)?;
        debug_assert_eq!(r.position(), PRIMARY_HEADER_LEN * 8);
        Ok(PrimaryHeader {
            version,
            packet_type,
            secondary_header_flag,
            pid,
            pcat,
            sequence_flags,
            sequence_count,
            packet_data_length,
        })
    }

    /// Re-encode the header into its 6-byte wire image.
    pub fn to_bytes(&self) -> [u8; PRIMARY_HEADER_LEN] {
        let word0: u16 = (u16::from(self.version) << 13)
            | (u16::from(self.packet_type) << 12)
            | (u16::from(self.secondary_header_flag) << 11)
            | (u16::from(self.pid) << 4)
            | u16::from(self.pcat);
        let word1: u16 = (u16::from(self.sequence_flags) << 14) | (self.sequence_count & 0x3FFF);
        let mut out = [0u8; PRIMARY_HEADER_LEN];
        out[0..2].copy_from_slice(&word0.to_be_bytes());
        out[2..4].copy_from_slice(&word1.to_be_bytes());
        out[4..6].copy_from_slice(&self.packet_data_length.to_be_bytes());
        out
    }

    /// Total size of the packet on the wire, headers included.
    pub fn packet_size(&self) -> usize {
        PRIMARY_HEADER_LEN + self.packet_data_length as usize + 1
    }

    /// Length of the user data field behind the secondary header.
    ///
    /// Saturates to 0 when the declared data length is shorter than the
    /// secondary header, which only happens on corrupted packets.
    pub fn user_data_length(&self) -> usize {
        (self.packet_data_length as usize + 1).saturating_sub(SECONDARY_HEADER_LEN)
    }

    #[cfg(feature = "to_json")]
    pub fn to_json(&self) -> Result<String, IspError> {
        serde_json::to_string(&self).map_err(IspError::SerdeError)
    }

    /// Check the fields that hold a fixed value for every valid packet.
    ///
    /// A failed check means the framing is not to be trusted; the record
    /// itself is still returned by the decoders so the caller can count or
    /// inspect the rejects.
    pub fn validate(&self, offset: usize) -> Result<(), IspError> {
        if self.version != 0 {
            return Err(IspError::InvalidPacket {
                reason: format!("packet version number is {} instead of 0", self.version),
                offset,
            });
        }
        if self.secondary_header_flag != 1 {
            return Err(IspError::InvalidPacket {
                reason: "secondary header flag is not set".to_string(),
                offset,
            });
        }
        if self.sequence_flags != 0b11 {
            return Err(IspError::InvalidPacket {
                reason: format!(
                    "sequence flags are {:#04b} instead of 0b11 (stand-alone)",
                    self.sequence_flags
                ),
                offset,
            });
        }
        Ok(())
    }
}

/// Packet datation service: the onboard time of the sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatationService {
    /// Bytes 0 - 3 (0..4) of the secondary header.
    pub coarse_time: u32,
    /// Bytes 4 - 5 (4..6) of the secondary header.
    pub fine_time: u16,
}

/// Fixed ancillary data service: mission and data-take identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedAncillaryService {
    /// Bytes 6 - 9 (6..10). Must equal [`SYNC_MARKER`].
    pub sync_marker: u32,
    /// Bytes 10 - 13 (10..14).
    pub data_take_id: u32,
    /// Byte 14. The instrument operating mode.
    pub ecc_num: EccNumber,
    /// Byte 15, bits 1-3 (bit 0 is unused).
    pub test_mode: TestMode,
    /// Byte 15, bits 4-7.
    pub rx_channel_id: RxChannelId,
    /// Bytes 16 - 19 (16..20).
    pub instrument_configuration_id: u32,
}

/// Sub-commutated ancillary data service: one slot of the 64-word frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubCommutationService {
    /// Byte 20. Slot number 1..=64; 0 means the service is idle.
    pub data_word_index: u8,
    /// Bytes 21 - 22 (21..23).
    pub data_word: u16,
}

/// Counters service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountersService {
    /// Bytes 23 - 26 (23..27). Packets since the start of the data take.
    pub space_packet_count: u32,
    /// Bytes 27 - 30 (27..31). Pulse repetition intervals since the start.
    pub pri_count: u32,
}

/// The SAS SSB message: beam steering for imaging, signal routing for
/// calibration. Which of the two the 18 payload bits mean is decided by the
/// ssb flag, so the tail is a sum type resolved at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SsbMessage {
    /// Imaging and noise operation (ssb flag 0).
    Imaging {
        /// 4-bit elevation beam address.
        elevation_beam_address: u8,
        /// 10-bit azimuth beam address.
        azimuth_beam_address: u16,
    },
    /// Calibration operation (ssb flag 1).
    Calibration {
        sas_test: SasTest,
        cal_type: CalType,
        /// 10-bit calibration beam address.
        calibration_beam_address: u16,
    },
}

/// SAS (SAR antenna subsystem) data, bytes 53 - 55 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SasData {
    /// Byte 53, bit 0. Discriminates the message tail.
    pub ssb_flag: bool,
    /// Byte 53, bits 1-3.
    pub polarization: Polarization,
    /// Byte 53, bits 4-5.
    pub temperature_compensation: TemperatureCompensation,
    /// Bytes 53 (bits 6-7) - 55: the flag-dependent message.
    pub message: SsbMessage,
}

/// SES (SAR electronics subsystem) data, bytes 56 - 58 of the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SesData {
    /// Byte 56, bits 0-1.
    pub cal_mode: CalMode,
    /// Byte 56, bits 3-7 (bit 2 is unused).
    pub tx_pulse_number: u8,
    /// Byte 57, bits 0-3.
    pub signal_type: SignalType,
    /// Byte 57, bit 7 (bits 4-6 are unused).
    pub swap: bool,
    /// Byte 58.
    pub swath_number: SwathNumber,
}

/// Radar configuration support service: everything the decoder needs to know
/// about how the sampling window was acquired and compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadarConfigurationService {
    /// Byte 31, bit 0.
    pub error_flag: bool,
    /// Byte 31, bits 3-7 (bits 1-2 are unused).
    pub baq_mode: BaqMode,
    /// Byte 32, as on the wire; see `baq_block_length_samples`.
    pub baq_block_length: u8,
    /// Byte 34 (byte 33 is unused).
    pub range_decimation: RangeDecimation,
    /// Byte 35, as on the wire; see `rx_gain_db`.
    pub rx_gain: u8,
    /// Bytes 36 - 37, sign-and-magnitude; see `tx_ramp_rate_hz_per_sec`.
    pub tx_ramp_rate: u16,
    /// Bytes 38 - 39, sign-and-magnitude; see `tx_pulse_start_freq_hz`.
    pub tx_pulse_start_freq: u16,
    /// Bytes 40 - 42, in F_REF cycles.
    pub tx_pulse_length: u32,
    /// Byte 43, bits 3-7 (bits 0-2 are unused). PRIs between transmit and
    /// receive of the same pulse.
    pub rank: u8,
    /// Bytes 44 - 46, in F_REF cycles.
    pub pri: u32,
    /// Bytes 47 - 49, in F_REF cycles.
    pub swst: u32,
    /// Bytes 50 - 52, in F_REF cycles.
    pub swl: u32,
    /// Bytes 53 - 55.
    pub sas: SasData,
    /// Bytes 56 - 58.
    pub ses: SesData,
}

/// Radar sample count service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadarSampleCountService {
    /// Bytes 59 - 60 (byte 61 is unused). Complex sample pairs per channel
    /// polyphase, i.e. a quarter of the total I/Q sample count.
    pub number_of_quads: u16,
}

/// This structure represents a parsed 62-byte packet secondary header.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SecondaryHeader {
    pub datation: DatationService,
    pub fixed_ancillary: FixedAncillaryService,
    pub sub_commutation: SubCommutationService,
    pub counters: CountersService,
    pub radar_config: RadarConfigurationService,
    pub sample_count: RadarSampleCountService,
}

impl SecondaryHeader {
    /// Decode a secondary header from exactly 62 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IspError> {
        if bytes.len() != SECONDARY_HEADER_LEN {
            return Err(IspError::SecondaryHeaderLength { l: bytes.len() });
        }
        let mut r = BitReader::new(bytes);

        // Datation service.
        let datation = DatationService {
            coarse_time: r.read_u32(32)?,
            fine_time: r.read_u16(16)?,
        };
        debug_assert_eq!(r.position(), 6 * 8);

        // Fixed ancillary data service.
        let sync_marker = r.read_u32(32)?;
        let data_take_id = r.read_u32(32)?;
        let ecc_num = EccNumber::from_code(r.read_u8(8)?);
        r.skip(1)?;
        let test_mode = TestMode::from_code(r.read_u8(3)?);
        let rx_channel_id = RxChannelId::from_code(r.read_u8(4)?);
        let instrument_configuration_id = r.read_u32(32)?;
        let fixed_ancillary = FixedAncillaryService {
            sync_marker,
            data_take_id,
            ecc_num,
            test_mode,
            rx_channel_id,
            instrument_configuration_id,
        };
        debug_assert_eq!(r.position(), 20 * 8);

        // Sub-commutated ancillary data service.
        let sub_commutation = SubCommutationService {
            data_word_index: r.read_u8(8)?,
            data_word: r.read_u16(16)?,
        };
        debug_assert_eq!(r.position(), 23 * 8);

        // Counters service.
        let counters = CountersService {
            space_packet_count: r.read_u32(32)?,
            pri_count: r.read_u32(32)?,
        };
        debug_assert_eq!(r.position(), 31 * 8);

        // Radar configuration support service.
        let error_flag = r.read_bit()?;
        r.skip(2)?;
        let baq_mode = BaqMode::from_code(r.read_u8(5)?);
        let baq_block_length = r.read_u8(8)?;
        r.skip(8)?;
        let range_decimation = RangeDecimation::from_code(r.read_u8(8)?);
        let rx_gain = r.read_u8(8)?;
        let tx_ramp_rate = r.read_u16(16)?;
        let tx_pulse_start_freq = r.read_u16(16)?;
        let tx_pulse_length = r.read_u32(24)?;
        r.skip(3)?;
        let rank = r.read_u8(5)?;
        let pri = r.read_u32(24)?;
        let swst = r.read_u32(24)?;
        let swl = r.read_u32(24)?;
        debug_assert_eq!(r.position(), 53 * 8);

        let ssb_flag = r.read_bit()?;
        let polarization = Polarization::from_code(r.read_u8(3)?);
        let temperature_compensation = TemperatureCompensation::from_code(r.read_u8(2)?);
        r.skip(2)?;
        let message = if !ssb_flag {
            let elevation_beam_address = r.read_u8(4)?;
            r.skip(2)?;
            let azimuth_beam_address = r.read_u16(10)?;
            SsbMessage::Imaging {
                elevation_beam_address,
                azimuth_beam_address,
            }
        } else {
            let sas_test = SasTest::from_code(r.read_u8(1)?);
            let cal_type = CalType::from_code(r.read_u8(3)?);
            r.skip(2)?;
            let calibration_beam_address = r.read_u16(10)?;
            SsbMessage::Calibration {
                sas_test,
                cal_type,
                calibration_beam_address,
            }
        };
        let sas = SasData {
            ssb_flag,
            polarization,
            temperature_compensation,
            message,
        };
        debug_assert_eq!(r.position(), 56 * 8);

        let cal_mode = CalMode::from_code(r.read_u8(2)?);
        r.skip(1)?;
        let tx_pulse_number = r.read_u8(5)?;
        let signal_type = SignalType::from_code(r.read_u8(4)?);
        r.skip(3)?;
        let swap = r.read_bit()?;
        let swath_number = SwathNumber(r.read_u8(8)?);
        let ses = SesData {
            cal_mode,
            tx_pulse_number,
            signal_type,
            swap,
            swath_number,
        };
        debug_assert_eq!(r.position(), 59 * 8);

        let radar_config = RadarConfigurationService {
            error_flag,
            baq_mode,
            baq_block_length,
            range_decimation,
            rx_gain,
            tx_ramp_rate,
            tx_pulse_start_freq,
            tx_pulse_length,
            rank,
            pri,
            swst,
            swl,
            sas,
            ses,
        };

        // Radar sample count service.
        let sample_count = RadarSampleCountService {
            number_of_quads: r.read_u16(16)?,
        };
        r.skip(8)?;
        debug_assert_eq!(r.position(), SECONDARY_HEADER_LEN * 8);

        Ok(SecondaryHeader {
            datation,
            fixed_ancillary,
            sub_commutation,
            counters,
            radar_config,
            sample_count,
        })
    }

    /// Check the sync marker. As with [`PrimaryHeader::validate`] the record
    /// is still produced on failure; this only reports it.
    pub fn validate(&self, offset: usize) -> Result<(), IspError> {
        if self.fixed_ancillary.sync_marker != SYNC_MARKER {
            return Err(IspError::InvalidPacket {
                reason: format!(
                    "sync marker is {:#010X} instead of {:#010X}",
                    self.fixed_ancillary.sync_marker, SYNC_MARKER
                ),
                offset,
            });
        }
        Ok(())
    }

    #[cfg(feature = "to_json")]
    pub fn to_json(&self) -> Result<String, IspError> {
        serde_json::to_string(&self).map_err(IspError::SerdeError)
    }

    /// Sub-second part of the packet datation, in seconds.
    pub fn fine_time_sec(&self) -> f64 {
        (f64::from(self.datation.fine_time) + 0.5) * (-16f64).exp2()
    }

    /// Full onboard time of the packet, in seconds.
    pub fn onboard_time_sec(&self) -> f64 {
        f64::from(self.datation.coarse_time) + self.fine_time_sec()
    }

    /// Pulse repetition interval in seconds.
    pub fn pri_sec(&self) -> f64 {
        f64::from(self.radar_config.pri) / F_REF_HZ
    }

    /// Sampling window start time in seconds.
    pub fn swst_sec(&self) -> f64 {
        f64::from(self.radar_config.swst) / F_REF_HZ
    }

    /// Sampling window length in seconds.
    pub fn swl_sec(&self) -> f64 {
        f64::from(self.radar_config.swl) / F_REF_HZ
    }

    /// Transmit pulse length in seconds.
    pub fn tx_pulse_length_sec(&self) -> f64 {
        f64::from(self.radar_config.tx_pulse_length) / F_REF_HZ
    }

    /// Commanded receive gain in dB.
    pub fn rx_gain_db(&self) -> f64 {
        -0.5 * f64::from(self.radar_config.rx_gain)
    }

    /// Transmit pulse ramp rate in Hz per second.
    ///
    /// The wire value is sign-and-magnitude: bit 15 set means positive.
    pub fn tx_ramp_rate_hz_per_sec(&self) -> f64 {
        let (sign, value) = sign_magnitude(self.radar_config.tx_ramp_rate);
        sign * f64::from(value) * F_REF_HZ * F_REF_HZ / (21f64).exp2()
    }

    /// Transmit pulse start frequency in Hz.
    pub fn tx_pulse_start_freq_hz(&self) -> f64 {
        let (sign, value) = sign_magnitude(self.radar_config.tx_pulse_start_freq);
        let ramp_rate_mhz_per_us = self.tx_ramp_rate_hz_per_sec() / 1e12;
        (ramp_rate_mhz_per_us / (4.0 * F_REF_MHZ) + sign * f64::from(value) * F_REF_MHZ / (14f64).exp2())
            * 1e6
    }

    /// BAQ block length in samples: the wire byte counts groups of eight.
    pub fn baq_block_length_samples(&self) -> usize {
        8 * (self.radar_config.baq_block_length as usize + 1)
    }

    /// The number of decimation filter output samples for this sampling
    /// window, from the window length and the decimation filter tables.
    ///
    /// All intermediate divisions truncate toward zero. Returns `None` when
    /// the range decimation code is not assigned, and 0 when the window is
    /// shorter than the filter transient.
    pub fn n3rx_samples(&self) -> Option<u32> {
        let rd = self.radar_config.range_decimation;
        let (num, den) = rd.decimation_ratio()?;
        let offset = rd.filter_output_offset()?;
        let d = rd.d_values()?;
        let b = 2 * i64::from(self.radar_config.swl) - i64::from(offset) - 17;
        if b < 0 {
            return Some(0);
        }
        let q = b / i64::from(den);
        let c = (b - i64::from(den) * q) as usize;
        Some((2 * (i64::from(num) * q + i64::from(d[c]) + 1)) as u32)
    }
}

/// Split a 16-bit sign-and-magnitude word into (sign, magnitude), where a
/// set bit 15 reads as positive.
fn sign_magnitude(word: u16) -> (f64, u16) {
    let sign = if word & 0x8000 != 0 { 1.0 } else { -1.0 };
    (sign, word & 0x7FFF)
}
