//! Reader for the fixed-layout Level-0 index files that accompany a raw
//! downlink file. The index maps acquisition times to byte offsets of the
//! packet stream, one 36-byte big-endian entry per indexed block.
use std::convert::TryInto;
use std::fs::File;
use std::io::{BufReader, Read};

use s1isp_core::errors::IspError;

use crate::stream::{read_exact_or_eof, ReadOutcome};

/// Bytes per index entry.
pub const INDEX_ENTRY_LEN: usize = 36;

/// One entry of a Level-0 index file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexEntry {
    /// Acquisition time of the indexed block, in days since the mission
    /// epoch.
    pub date_time: f64,
    /// Time span covered by the block, in seconds.
    pub time_delta: f64,
    /// Size of the indexed block in bytes.
    pub data_size: u64,
    /// Downlink channel the block arrived on.
    pub channel: u32,
    /// Virtual channel identifier.
    pub vcid: u32,
    /// Running block counter.
    pub counter: u32,
}

impl IndexEntry {
    /// Decode one entry from its 36-byte image.
    pub fn from_bytes(bytes: &[u8; INDEX_ENTRY_LEN]) -> Self {
        IndexEntry {
            date_time: f64::from_be_bytes(bytes[0..8].try_into().unwrap()),
            time_delta: f64::from_be_bytes(bytes[8..16].try_into().unwrap()),
            data_size: u64::from_be_bytes(bytes[16..24].try_into().unwrap()),
            channel: u32::from_be_bytes(bytes[24..28].try_into().unwrap()),
            vcid: u32::from_be_bytes(bytes[28..32].try_into().unwrap()),
            counter: u32::from_be_bytes(bytes[32..36].try_into().unwrap()),
        }
    }
}

/// A lazy reader over the entries of an index file.
#[derive(Debug)]
pub struct IndexReader<R> {
    reader: R,
}

impl IndexReader<BufReader<File>> {
    /// Open an index file, checking first that its length is a whole number
    /// of entries.
    pub fn open(file_name: &str) -> Result<Self, IspError> {
        let file = File::open(file_name)?;
        let len = file.metadata()?.len();
        if len % INDEX_ENTRY_LEN as u64 != 0 {
            return Err(IspError::IndexFileLength { l: len });
        }
        Ok(IndexReader {
            reader: BufReader::new(file),
        })
    }
}

impl<R: Read> IndexReader<R> {
    /// Wrap any byte source holding concatenated index entries.
    pub fn new(reader: R) -> Self {
        IndexReader { reader }
    }
}

impl<R: Read> Iterator for IndexReader<R> {
    type Item = Result<IndexEntry, IspError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = [0u8; INDEX_ENTRY_LEN];
        match read_exact_or_eof(&mut self.reader, &mut bytes) {
            ReadOutcome::Full => Some(Ok(IndexEntry::from_bytes(&bytes))),
            ReadOutcome::Eof => None,
            ReadOutcome::Partial(filled) => Some(Err(IspError::UnexpectedEof {
                needed: (INDEX_ENTRY_LEN - filled) * 8,
                available: 0,
            })),
            ReadOutcome::Failed(e) => Some(Err(e.into())),
        }
    }
}

/// Read a whole index file into memory in entry order.
pub fn read_index_file(file_name: &str) -> Result<Vec<IndexEntry>, IspError> {
    IndexReader::open(file_name)?.collect()
}
