/// Errors that can occur while encoding.
///
/// The encoder performs no validation of call ordering; the caller is
/// responsible for well-nested begin/end pairs and for writing a field
/// name before each value inside an object. A malformed call sequence
/// produces malformed output, not an error. The only failure mode left
/// is the underlying sink refusing bytes.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// An I/O error from the underlying writer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
