use thiserror::Error;

/// Failures while encoding or decoding wire-format payloads.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The buffer does not open with the record magic.
    #[error("not a time zone record: bad magic {0:?}")]
    BadMagic([u8; 4]),
    /// The record declares a format version this library cannot read.
    #[error("unsupported record format version {0}")]
    UnsupportedVersion(u8),
    /// A read or length prefix points past the end of the buffer.
    #[error("record truncated at byte {offset}: needed {needed} more bytes, {available} left")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Zone id bytes are not valid UTF-8.
    #[error("zone id is not valid UTF-8")]
    InvalidZoneId(#[from] std::str::Utf8Error),
    /// Zone id longer than the wire format's u16 length prefix allows.
    #[error("zone id of {0} bytes exceeds the wire format limit")]
    ZoneIdTooLong(usize),
    /// Envelope text does not have the `minLat,minLon,maxLat,maxLon` shape.
    #[error("malformed envelope text '{0}'")]
    MalformedEnvelope(String),
    /// Bytes left over after a complete record was decoded.
    #[error("{0} trailing bytes after record end")]
    TrailingBytes(usize),
}
