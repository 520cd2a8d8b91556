use crate::error::WireError;

/// Safety ceiling for a single String/Bytes payload, in bytes.
///
/// A corrupt or malicious length prefix could otherwise request an
/// arbitrarily large allocation before a single payload byte has been
/// read. Lengths above this ceiling are rejected up front.
pub const MAX_STRING_OR_BYTES_LEN: i64 = 10_000_000;

/// Validate a decoded String/Bytes length prefix and narrow it to `usize`.
///
/// # Errors
///
/// Returns [`WireError::LengthOutOfRange`] if `length` is negative or
/// exceeds [`MAX_STRING_OR_BYTES_LEN`].
pub fn validate_len(length: i64) -> Result<usize, WireError> {
    if !(0..=MAX_STRING_OR_BYTES_LEN).contains(&length) {
        return Err(WireError::LengthOutOfRange { length });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(length as usize)
}
