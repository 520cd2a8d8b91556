use crate::limits::MAX_STRING_OR_BYTES_LEN;

/// Wire-level format errors shared by the encoder and decoder crates.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A byte that is not a recognised signature was found where an item
    /// signature was expected.
    #[error("unexpected signature byte {found:#04X}")]
    UnexpectedTag { found: u8 },

    /// A decoded String/Bytes length prefix was negative or above the
    /// safety ceiling. Rejected before any allocation is attempted.
    #[error("string/bytes length {length} out of range (limit {MAX_STRING_OR_BYTES_LEN})")]
    LengthOutOfRange { length: i64 },
}
