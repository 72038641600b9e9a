/// Basic Error types.
#[derive(Debug)]
pub enum IspError {
    /// TryFromSliceError from the std library.
    TryFromSlice(std::array::TryFromSliceError),
    /// IoError from the std library.
    StdIoError(std::io::Error),
    /// Map file error (this is just a `std::io` error when mapping files).
    MapFile(std::io::Error),
    /// The bit or byte input ran out before the requested read.
    UnexpectedEof { needed: usize, available: usize },
    /// A byte-string read was requested at a position that is not byte aligned.
    UnalignedRead { bit_position: usize },
    /// Primary header length problems.
    PrimaryHeaderLength { l: usize },
    /// Secondary header length problems.
    SecondaryHeaderLength { l: usize },
    /// A packet failed one of the primary or secondary header sanity checks.
    InvalidPacket { reason: String, offset: usize },
    /// An FDBAQ bit rate code outside of 0..=4.
    InvalidBrc { value: u8 },
    /// A sample code with no entry in the reconstruction tables. The
    /// quantizer is named, e.g. "BRC2" or "Baq4Bit".
    InvalidCode { quantizer: String, code: u8 },
    /// A BAQ mode the user data field decoder has no pipeline for.
    UnsupportedBaqMode { code: u8 },
    /// File is too short to hold even one packet header.
    FileTooShort,
    /// Packet not found.
    PacketNotFound { i: usize },
    /// The stream ended in the middle of a packet.
    TruncatedStream { offset: usize },
    /// An index file whose length is not a whole number of entries.
    IndexFileLength { l: u64 },
    /// An error in the decode settings.
    SettingsError { msg: String },
    #[cfg(feature = "to_json")]
    /// Serialisation/Deserialisation error.
    SerdeError(serde_json::Error),
}

impl From<std::array::TryFromSliceError> for IspError {
    fn from(e: std::array::TryFromSliceError) -> Self {
        Self::TryFromSlice(e)
    }
}

impl From<std::io::Error> for IspError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl std::fmt::Display for IspError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::IspError::*;
        match self {
            #[cfg(feature = "to_json")]
            SerdeError(x) => write!(fmt, "{}", x),
            StdIoError(x) => write!(fmt, "{}", x),
            TryFromSlice(x) => write!(fmt, "{}", x),
            MapFile(e) => write!(fmt, "Could not create file map: {}", e),
            UnexpectedEof { needed, available } => write!(
                fmt,
                "Input exhausted: needed {} more bits but only {} remain",
                needed, available
            ),
            UnalignedRead { bit_position } => write!(
                fmt,
                "Byte read requested at bit position {} which is not byte aligned",
                bit_position
            ),
            PrimaryHeaderLength { l } => {
                write!(fmt, "Primary header should be 6 bytes but is {}", l)
            }
            SecondaryHeaderLength { l } => {
                write!(fmt, "Secondary header should be 62 bytes but is {}", l)
            }
            InvalidPacket { reason, offset } => {
                write!(fmt, "Invalid packet at byte {}: {}", offset, reason)
            }
            InvalidBrc { value } => write!(fmt, "Bit rate code {} is outside of 0..=4", value),
            InvalidCode { quantizer, code } => write!(
                fmt,
                "Sample code {} has no reconstruction entry for {}",
                code, quantizer
            ),
            UnsupportedBaqMode { code } => {
                write!(fmt, "No user data pipeline for BAQ mode code {}", code)
            }
            FileTooShort => write!(fmt, "File is too short to hold a packet header"),
            PacketNotFound { i } => write!(fmt, "Packet no. {} not found.", i),
            TruncatedStream { offset } => write!(
                fmt,
                "Stream ended in the middle of the packet starting at byte {}",
                offset
            ),
            IndexFileLength { l } => write!(
                fmt,
                "Index file length {} is not a whole number of 36-byte entries",
                l
            ),
            SettingsError { msg } => write!(fmt, "Error in settings: {}", msg),
        }
    }
}

impl From<IspError> for String {
    fn from(e: IspError) -> String {
        e.to_string()
    }
}

impl std::error::Error for IspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::IspError::*;
        match self {
            #[cfg(feature = "to_json")]
            SerdeError(x) => x.source(),
            StdIoError(x) | MapFile(x) => x.source(),
            TryFromSlice(x) => x.source(),
            _ => None,
        }
    }
}
