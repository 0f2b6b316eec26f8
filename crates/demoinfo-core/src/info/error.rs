use thiserror::Error;

/// Errors returned while decoding a match-info byte stream.
///
/// Every variant is fatal for the file being decoded: there is no partial
/// record. Offsets are byte positions from the start of the stream.
///
/// # Examples
/// ```
/// use demoinfo_core::DecodeError;
///
/// let err = DecodeError::UnknownTag { tag: 0xff, offset: 12 };
/// assert!(err.to_string().contains("unknown tag 0xff"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated stream at offset {offset}: need {needed} bytes, got {available}")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("unexpected tag at offset {offset}: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedTag {
        expected: u8,
        actual: u8,
        offset: usize,
    },
    #[error("unknown tag {tag:#04x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error(
        "slot overflow for tag {tag:#04x} at offset {offset}: slot {slot} exceeds capacity {capacity}"
    )]
    SlotOverflow {
        tag: u8,
        slot: usize,
        capacity: usize,
        offset: usize,
    },
    #[error("timestamp out of range at offset {offset}: {value}")]
    TimestampOutOfRange { value: i64, offset: usize },
}
