//! Unit tests over synthetic packet buffers. Packets are assembled byte by
//! byte from the wire layout so the tests double as a layout reference.
use std::io::Cursor;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use s1isp_core::errors::IspError;
use s1isp_core::{
    DecodeSettings, InvalidPacketPolicy, PrimaryHeader, UserData, UserDataMode, SYNC_MARKER,
};

use crate::index::{IndexEntry, IndexReader, INDEX_ENTRY_LEN};
use crate::stream::IspStream;
use crate::subcom::{InstrumentStatus, SubcomAccumulator, FRAME_BYTES, FRAME_WORDS};
use crate::IspFile;

/// The knobs a synthetic packet needs; everything else is fixed.
pub struct PacketSpec {
    pub sequence_count: u16,
    pub data_word_index: u8,
    pub data_word: u16,
    pub space_packet_count: u32,
    pub pri_count: u32,
    pub number_of_quads: u16,
    pub sync_marker: u32,
    /// Bypass sample value written into every slot of the user data.
    pub sample_value: i32,
}

impl Default for PacketSpec {
    fn default() -> Self {
        PacketSpec {
            sequence_count: 0,
            data_word_index: 0,
            data_word: 0,
            space_packet_count: 0,
            pri_count: 0,
            number_of_quads: 2,
            sync_marker: SYNC_MARKER,
            sample_value: 5,
        }
    }
}

/// Build the user data field of a bypass packet where every sample of every
/// channel holds the same value: 10-bit signed-magnitude codes, each channel
/// padded to a 16-bit word.
pub fn bypass_udf(number_of_quads: usize, value: i32) -> Vec<u8> {
    let code: u32 = if value < 0 {
        0x200 | value.unsigned_abs()
    } else {
        value as u32
    };
    let mut bits: Vec<bool> = Vec::new();
    for _ in 0..4 {
        for _ in 0..number_of_quads {
            for b in (0..10).rev() {
                bits.push(code >> b & 1 != 0);
            }
        }
        while bits.len() % 16 != 0 {
            bits.push(false);
        }
    }
    let mut bytes = vec![0u8; bits.len() / 8];
    for (i, bit) in bits.iter().enumerate() {
        if *bit {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }
    bytes
}

/// Assemble a complete packet: primary header, secondary header commanding
/// bypass compression, and the user data field.
pub fn build_packet(spec: &PacketSpec) -> Vec<u8> {
    let udf = bypass_udf(spec.number_of_quads as usize, spec.sample_value);

    let mut sh = [0u8; 62];
    sh[0..4].copy_from_slice(&1_000_000u32.to_be_bytes()); // coarse time
    sh[4..6].copy_from_slice(&0x8000u16.to_be_bytes()); // fine time
    sh[6..10].copy_from_slice(&spec.sync_marker.to_be_bytes());
    sh[10..14].copy_from_slice(&0x0102_0304u32.to_be_bytes()); // data take id
    sh[14] = 3; // ECC: stripmap 3
    sh[15] = 0x01; // test mode default, rx channel H
    sh[16..20].copy_from_slice(&7u32.to_be_bytes()); // configuration id
    sh[20] = spec.data_word_index;
    sh[21..23].copy_from_slice(&spec.data_word.to_be_bytes());
    sh[23..27].copy_from_slice(&spec.space_packet_count.to_be_bytes());
    sh[27..31].copy_from_slice(&spec.pri_count.to_be_bytes());
    sh[31] = 0; // error flag clear, BAQ mode 0 (bypass)
    sh[32] = 31; // BAQ block length
    sh[34] = 4; // range decimation 4/9
    sh[35] = 10; // rx gain
    sh[36..38].copy_from_slice(&0x8F30u16.to_be_bytes()); // tx ramp rate
    sh[38..40].copy_from_slice(&0x0123u16.to_be_bytes()); // tx pulse start freq
    sh[40..43].copy_from_slice(&[0x01, 0x86, 0xA0]); // tx pulse length
    sh[43] = 9; // rank
    sh[44..47].copy_from_slice(&[0x00, 0x55, 0x63]); // PRI
    sh[47..50].copy_from_slice(&[0x00, 0x06, 0x96]); // SWST
    sh[50..53].copy_from_slice(&[0x00, 0x2E, 0xFE]); // SWL
    sh[53] = 0x7C; // imaging message, polarization VV/VH, temp comp on
    sh[54] = 0x50; // elevation beam 5
    sh[55] = 0x55; // azimuth beam
    sh[56] = 0x03; // cal mode 0, tx pulse number 3
    sh[57] = 0x01; // signal type echo, swap set
    sh[58] = 2; // swath number S3
    sh[59..61].copy_from_slice(&spec.number_of_quads.to_be_bytes());

    let primary = PrimaryHeader {
        version: 0,
        packet_type: 0,
        secondary_header_flag: 1,
        pid: 65,
        pcat: 12,
        sequence_flags: 0b11,
        sequence_count: spec.sequence_count,
        packet_data_length: (62 + udf.len() - 1) as u16,
    };

    let mut packet = Vec::with_capacity(6 + 62 + udf.len());
    packet.extend_from_slice(&primary.to_bytes());
    packet.extend_from_slice(&sh);
    packet.extend_from_slice(&udf);
    packet
}

fn packet_run(count: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    for i in 0..count {
        bytes.extend(build_packet(&PacketSpec {
            sequence_count: i as u16,
            space_packet_count: i as u32,
            pri_count: 100 + i as u32,
            data_word_index: (i % FRAME_WORDS) as u8 + 1,
            data_word: 0x1100 + i as u16,
            ..Default::default()
        }));
    }
    bytes
}

mod stream {
    use super::*;

    #[test]
    fn walks_a_run_of_packets() {
        let bytes = packet_run(3);
        let packet_size = bytes.len() / 3;
        let mut settings = DecodeSettings::default();
        settings.set_user_data_mode(UserDataMode::Decode);
        let stream = IspStream::new(Cursor::new(bytes), settings);

        let records: Vec<_> = stream.map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.byte_offset as usize, i * packet_size);
            assert_eq!(record.secondary_header.counters.space_packet_count, i as u32);
            assert!(record.error.is_none());
            let samples = match record.user_data.as_ref().unwrap() {
                UserData::Samples(s) => s,
                other => panic!("expected samples, got {:?}", other),
            };
            assert_eq!(samples.len(), 4);
            assert!(samples.iter().all(|s| s.re == 5.0 && s.im == 5.0));
        }
    }

    #[test]
    fn extract_mode_keeps_raw_bytes() {
        let bytes = packet_run(1);
        let mut settings = DecodeSettings::default();
        settings.set_user_data_mode(UserDataMode::Extract);
        let mut stream = IspStream::new(Cursor::new(bytes), settings);
        let record = stream.next().unwrap().unwrap();
        let raw = record.user_data.unwrap();
        assert_eq!(raw.raw().unwrap(), &bypass_udf(2, 5)[..]);
    }

    #[test]
    fn skip_and_max_count_bound_the_walk() {
        let bytes = packet_run(5);
        let mut settings = DecodeSettings::default();
        settings.set_skip_packets(1);
        settings.set_max_count(2).unwrap();
        let stream = IspStream::new(Cursor::new(bytes), settings);
        let counts: Vec<u32> = stream
            .map(|r| r.unwrap().secondary_header.counters.space_packet_count)
            .collect();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn zero_max_count_is_rejected() {
        let mut settings = DecodeSettings::default();
        assert!(matches!(
            settings.set_max_count(0),
            Err(IspError::SettingsError { .. })
        ));
        settings.set_max_count(3).unwrap();
        assert_eq!(settings.get_max_count(), Some(3));
    }

    #[test]
    fn bytes_offset_skips_a_preamble() {
        let mut bytes = vec![0xEEu8; 13];
        bytes.extend(packet_run(1));
        let mut settings = DecodeSettings::default();
        settings.set_bytes_offset(13);
        let mut stream = IspStream::new(Cursor::new(bytes), settings);
        let record = stream.next().unwrap().unwrap();
        assert_eq!(record.byte_offset, 13);
        assert!(stream.next().is_none());
    }

    #[test]
    fn ten_loose_bytes_are_an_unexpected_eof() {
        let bytes = vec![0u8; 10];
        let mut stream = IspStream::new(Cursor::new(bytes), DecodeSettings::default());
        // The primary header parses (it is all zeros and fails its sanity
        // checks), but the secondary header runs off the end with no
        // complete record emitted.
        let item = stream.next().unwrap();
        assert!(matches!(item, Err(IspError::UnexpectedEof { .. })), "{:?}", item);
        assert!(stream.next().is_none());
    }

    #[test]
    fn truncation_after_whole_packets_names_the_offset() {
        let mut bytes = packet_run(2);
        let packet_size = bytes.len() / 2;
        bytes.truncate(packet_size + 20);
        let mut stream = IspStream::new(Cursor::new(bytes), DecodeSettings::default());
        assert!(stream.next().unwrap().is_ok());
        let item = stream.next().unwrap();
        match item {
            Err(IspError::TruncatedStream { offset }) => assert_eq!(offset, packet_size),
            other => panic!("expected a truncated stream, got {:?}", other),
        }
        assert!(stream.next().is_none());
    }

    #[test]
    fn bad_sync_marker_is_attached_and_halts() {
        let mut spec = PacketSpec::default();
        spec.sync_marker = 0xDEAD_BEEF;
        let mut bytes = build_packet(&spec);
        bytes.extend(packet_run(1));
        let mut stream = IspStream::new(Cursor::new(bytes), DecodeSettings::default());
        let record = stream.next().unwrap().unwrap();
        assert!(matches!(
            record.error,
            Some(IspError::InvalidPacket { offset: 0, .. })
        ));
        // Halt policy: the walk is over even though more packets follow.
        assert!(stream.next().is_none());
    }

    #[test]
    fn resync_recovers_across_garbage() {
        let mut bytes = vec![0xFFu8; 5];
        bytes.extend(packet_run(2));
        let mut settings = DecodeSettings::default();
        settings.set_invalid_packet_policy(InvalidPacketPolicy::Resync);
        let stream = IspStream::new(Cursor::new(bytes), settings);
        let records: Vec<_> = stream.map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].byte_offset, 5);
        assert!(records[0].error.is_none());
    }

    #[test]
    fn cancellation_stops_between_packets() {
        let bytes = packet_run(3);
        let flag = Arc::new(AtomicBool::new(false));
        let mut stream = IspStream::new(Cursor::new(bytes), DecodeSettings::default())
            .with_cancel_flag(flag.clone());
        assert!(stream.next().unwrap().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert!(stream.next().is_none());
        assert_eq!(stream.emitted(), 1);
    }

    #[test]
    fn subcom_words_are_collected_from_the_stream() {
        let mut bytes = Vec::new();
        for i in 0..FRAME_WORDS {
            bytes.extend(build_packet(&PacketSpec {
                sequence_count: i as u16,
                pri_count: i as u32,
                data_word_index: i as u8 + 1,
                data_word: i as u16,
                ..Default::default()
            }));
        }
        let mut stream = IspStream::new(Cursor::new(bytes), DecodeSettings::default());
        while let Some(item) = stream.next() {
            item.unwrap();
        }
        let frames = stream.take_ancillary_frames();
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].partial);
        assert_eq!(frames[0].words_received, FRAME_WORDS);
    }
}

mod subcom {
    use super::*;

    /// A frame image with recognisable values in every field.
    fn status_image() -> [u8; FRAME_BYTES] {
        let mut raw = [0u8; FRAME_BYTES];
        raw[0..8].copy_from_slice(&7_071_000.5f64.to_be_bytes());
        raw[8..16].copy_from_slice(&(-12.25f64).to_be_bytes());
        raw[16..24].copy_from_slice(&1.0f64.to_be_bytes());
        raw[24..28].copy_from_slice(&7.5f32.to_be_bytes());
        raw[28..32].copy_from_slice(&(-0.5f32).to_be_bytes());
        raw[32..36].copy_from_slice(&1234.0f32.to_be_bytes());
        raw[36..40].copy_from_slice(&1_000_001u32.to_be_bytes());
        raw[40..42].copy_from_slice(&0x4321u16.to_be_bytes());
        raw[44..48].copy_from_slice(&0.99f32.to_be_bytes());
        raw[48..52].copy_from_slice(&0.01f32.to_be_bytes());
        raw[52..56].copy_from_slice(&(-0.01f32).to_be_bytes());
        raw[56..60].copy_from_slice(&0.1f32.to_be_bytes());
        raw[60..64].copy_from_slice(&0.001f32.to_be_bytes());
        raw[64..68].copy_from_slice(&0.002f32.to_be_bytes());
        raw[68..72].copy_from_slice(&0.003f32.to_be_bytes());
        raw[72..76].copy_from_slice(&1_000_002u32.to_be_bytes());
        raw[76..78].copy_from_slice(&0x1111u16.to_be_bytes());
        for w in 0..24 {
            let i = 80 + 2 * w;
            raw[i..i + 2].copy_from_slice(&(0x0A00 + w as u16).to_be_bytes());
        }
        raw
    }

    fn words_of(raw: &[u8; FRAME_BYTES]) -> Vec<u16> {
        raw.chunks(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect()
    }

    #[test]
    fn sixty_four_ordered_words_close_a_frame() {
        let raw = status_image();
        let mut accumulator = SubcomAccumulator::new();
        for (i, word) in words_of(&raw).iter().enumerate() {
            accumulator.push(i as u8 + 1, *word, i as u32);
        }
        let frames = accumulator.frames();
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert!(!frame.partial);
        assert_eq!(frame.words_received, FRAME_WORDS);
        assert_eq!(frame.pri_count_first, 0);
        assert_eq!(frame.pri_count_last, 63);
        assert_eq!(&frame.raw[..], &raw[..]);

        let status = frame.status.as_ref().unwrap();
        assert_eq!(status.position_x_m, 7_071_000.5);
        assert_eq!(status.position_y_m, -12.25);
        assert_eq!(status.position_z_m, 1.0);
        assert_eq!(status.velocity_x_m_per_s, 7.5);
        assert_eq!(status.velocity_y_m_per_s, -0.5);
        assert_eq!(status.velocity_z_m_per_s, 1234.0);
        assert_eq!(status.pod_data_stamp_coarse, 1_000_001);
        assert_eq!(status.pod_data_stamp_fine, 0x4321);
        assert_eq!(status.quaternion_0, 0.99);
        assert_eq!(status.angular_rate_z, 0.003);
        assert_eq!(status.attitude_data_stamp_coarse, 1_000_002);
        assert_eq!(status.temperature_words[0], 0x0A00);
        assert_eq!(status.temperature_words[23], 0x0A17);
    }

    #[test]
    fn slot_one_mid_frame_resets() {
        let mut accumulator = SubcomAccumulator::new();
        for i in 0..10u8 {
            accumulator.push(i + 1, 0xAB00 + u16::from(i), u32::from(i));
        }
        // A new slot 1 restarts; the 10 collected slots come out partial.
        accumulator.push(1, 0xCDCD, 100);
        let frames = accumulator.frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].partial);
        assert_eq!(frames[0].words_received, 10);
        assert!(frames[0].status.is_none());

        // The restarted frame can still run to completion.
        for i in 1..FRAME_WORDS {
            accumulator.push(i as u8 + 1, 0, 100 + i as u32);
        }
        assert_eq!(accumulator.frames().len(), 2);
        assert!(!accumulator.frames()[1].partial);
    }

    #[test]
    fn pri_gap_abandons_the_frame() {
        let mut accumulator = SubcomAccumulator::new();
        accumulator.push(1, 1, 10);
        accumulator.push(2, 2, 11);
        accumulator.push(3, 3, 20); // lost packets in between
        let frames = accumulator.frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].partial);
        assert_eq!(frames[0].words_received, 2);
        // After the gap the accumulator waits for the next slot 1.
        accumulator.push(4, 4, 21);
        assert_eq!(accumulator.frames().len(), 1);
    }

    #[test]
    fn out_of_order_slot_abandons_the_frame() {
        let mut accumulator = SubcomAccumulator::new();
        accumulator.push(1, 1, 0);
        accumulator.push(3, 3, 1);
        assert_eq!(accumulator.frames().len(), 1);
        assert!(accumulator.frames()[0].partial);
    }

    #[test]
    fn idle_slots_are_ignored() {
        let mut accumulator = SubcomAccumulator::new();
        accumulator.push(0, 0, 0);
        assert!(accumulator.frames().is_empty());
        accumulator.push(1, 1, 1);
        accumulator.push(0, 0, 2);
        accumulator.flush();
        assert_eq!(accumulator.frames().len(), 1);
        assert_eq!(accumulator.frames()[0].words_received, 1);
    }

    #[test]
    fn flush_emits_the_tail_as_partial() {
        let mut accumulator = SubcomAccumulator::new();
        for i in 0..5u8 {
            accumulator.push(i + 1, u16::from(i), u32::from(i));
        }
        accumulator.flush();
        let frames = accumulator.frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].partial);
        assert_eq!(frames[0].words_received, 5);
    }
}

mod index {
    use super::*;

    fn entry_bytes(entry: &IndexEntry) -> [u8; INDEX_ENTRY_LEN] {
        let mut bytes = [0u8; INDEX_ENTRY_LEN];
        bytes[0..8].copy_from_slice(&entry.date_time.to_be_bytes());
        bytes[8..16].copy_from_slice(&entry.time_delta.to_be_bytes());
        bytes[16..24].copy_from_slice(&entry.data_size.to_be_bytes());
        bytes[24..28].copy_from_slice(&entry.channel.to_be_bytes());
        bytes[28..32].copy_from_slice(&entry.vcid.to_be_bytes());
        bytes[32..36].copy_from_slice(&entry.counter.to_be_bytes());
        bytes
    }

    fn sample_entries() -> Vec<IndexEntry> {
        (0..3u32)
            .map(|i| IndexEntry {
                date_time: 8_400.5 + f64::from(i),
                time_delta: 2.5,
                data_size: 1024 * u64::from(i + 1),
                channel: 1,
                vcid: 2,
                counter: u32::from(i),
            })
            .collect()
    }

    #[test]
    fn entries_round_trip_through_a_reader() {
        let entries = sample_entries();
        let mut bytes = Vec::new();
        for entry in &entries {
            bytes.extend_from_slice(&entry_bytes(entry));
        }
        let read: Vec<_> = IndexReader::new(Cursor::new(bytes))
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(read, entries);
    }

    #[test]
    fn a_torn_entry_is_an_error() {
        let entries = sample_entries();
        let mut bytes = Vec::new();
        for entry in &entries {
            bytes.extend_from_slice(&entry_bytes(entry));
        }
        bytes.truncate(bytes.len() - 7);
        let mut reader = IndexReader::new(Cursor::new(bytes));
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next().unwrap(),
            Err(IspError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn open_checks_the_file_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; INDEX_ENTRY_LEN + 1]).unwrap();
        file.flush().unwrap();
        let err = IndexReader::open(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, IspError::IndexFileLength { l } if l == 37));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let entries = sample_entries();
        for entry in &entries {
            file.write_all(&entry_bytes(entry)).unwrap();
        }
        file.flush().unwrap();
        let read = crate::index::read_index_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(read, entries);
    }
}

mod isp_file {
    use super::*;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn frames_and_decodes_a_file() {
        let bytes = packet_run(3);
        let packet_size = bytes.len() / 3;
        let file = write_temp(&bytes);
        let isp_file = IspFile::open(file.path().to_str().unwrap(), Default::default()).unwrap();

        assert_eq!(isp_file.packet_count(), 3);
        assert!(isp_file.terminal_error().is_none());
        assert_eq!(
            isp_file.packet_offsets(),
            vec![0, packet_size, 2 * packet_size]
        );

        let isp = isp_file.get_isp(1).unwrap();
        assert_eq!(
            isp.get_secondary_header().counters.space_packet_count,
            1
        );
        assert!(isp.validate().is_ok());

        let samples = isp_file.get_user_data_as_complex(1).unwrap();
        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|s| s.re == 5.0 && s.im == 5.0));

        let raw = isp_file.get_user_data_as_bytes(2).unwrap();
        assert_eq!(raw, bypass_udf(2, 5));

        assert!(matches!(
            isp_file.get_user_data_as_complex(99),
            Err(IspError::PacketNotFound { i: 99 })
        ));
    }

    #[test]
    fn truncated_tail_keeps_whole_records() {
        let mut bytes = packet_run(2);
        let packet_size = bytes.len() / 2;
        bytes.truncate(packet_size + 30);
        let file = write_temp(&bytes);
        let isp_file = IspFile::open(file.path().to_str().unwrap(), Default::default()).unwrap();
        assert_eq!(isp_file.packet_count(), 1);
        assert!(matches!(
            isp_file.terminal_error(),
            Some(IspError::TruncatedStream { offset }) if *offset == packet_size
        ));
    }

    #[test]
    fn ten_byte_file_yields_nothing_but_an_eof() {
        let file = write_temp(&[0u8; 10]);
        let mut settings = DecodeSettings::default();
        settings.set_invalid_packet_policy(InvalidPacketPolicy::Resync);
        let isp_file = IspFile::open(file.path().to_str().unwrap(), settings).unwrap();
        assert_eq!(isp_file.packet_count(), 0);
        assert!(isp_file.ancillary_frames().is_empty());
    }

    #[test]
    fn collects_ancillary_frames_across_the_file() {
        let mut bytes = Vec::new();
        for i in 0..(FRAME_WORDS + 4) {
            bytes.extend(build_packet(&PacketSpec {
                sequence_count: i as u16,
                pri_count: i as u32,
                data_word_index: (i % FRAME_WORDS) as u8 + 1,
                data_word: i as u16,
                ..Default::default()
            }));
        }
        let file = write_temp(&bytes);
        let isp_file = IspFile::open(file.path().to_str().unwrap(), Default::default()).unwrap();
        assert_eq!(isp_file.packet_count(), FRAME_WORDS + 4);
        // One complete frame plus the four-word tail flushed as partial.
        let frames = isp_file.ancillary_frames();
        assert_eq!(frames.len(), 2);
        assert!(!frames[0].partial);
        assert!(frames[1].partial);
        assert_eq!(frames[1].words_received, 4);
    }

    #[test]
    fn resync_skips_leading_garbage() {
        let mut bytes = vec![0xFFu8; 9];
        bytes.extend(packet_run(2));
        let file = write_temp(&bytes);
        let mut settings = DecodeSettings::default();
        settings.set_invalid_packet_policy(InvalidPacketPolicy::Resync);
        let isp_file = IspFile::open(file.path().to_str().unwrap(), settings).unwrap();
        assert_eq!(isp_file.packet_count(), 2);
        assert_eq!(isp_file.get_isp(0).unwrap().get_start(), 9);
    }
}

mod instrument_status {
    use super::*;

    #[test]
    fn rejects_short_frames() {
        assert!(InstrumentStatus::from_bytes(&[0u8; 64]).is_err());
        assert!(InstrumentStatus::from_bytes(&[0u8; FRAME_BYTES]).is_ok());
    }
}
