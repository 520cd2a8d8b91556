use binson_wire::WireError;

use crate::decoder::State;

/// Errors that can occur while decoding a Binson stream.
///
/// Every variant is fatal to the decoder instance: the first error
/// poisons it, and all later calls return [`DecodeError::Poisoned`].
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── UnexpectedEof         ← stream ended inside an item
///   ├── MissingRootObject     ← first byte was not Object-begin (0x40)
///   ├── FieldNameNotString    ← non-String item where a name was required
///   ├── InvalidUtf8           ← String payload or field name not UTF-8
///   ├── NotBeforeField        ← usage: read a field in the wrong state
///   ├── NotBeforeArrayValue   ← usage: read an element in the wrong state
///   ├── NotAnObject           ← usage: enter_object without a pending Object
///   ├── NotAnArray            ← usage: enter_array without a pending Array
///   ├── NotAtContainerEnd     ← usage: ascend from an unexpected state
///   ├── Poisoned              ← any call after a previous failure
///   ├── Wire(WireError)       ← malformed tag or out-of-range length
///   └── Io(std::io::Error)    ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input stream ended before the current item was complete,
    /// including the one-byte signature read itself. Normal end of a
    /// document is signalled only by End markers, never by EOF.
    #[error("abnormal end of input stream")]
    UnexpectedEof,

    /// The first byte of the stream was not the Object-begin marker.
    /// Every Binson document has exactly one root object.
    #[error("expected root Object begin (0x40), got {found:#04X}")]
    MissingRootObject { found: u8 },

    /// A value was found where a field name (String item) was required.
    #[error("field name must be a String item, got signature {found:#04X}")]
    FieldNameNotString { found: u8 },

    /// A String payload or field name contained invalid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// `next_field` was called while the cursor was not inside an
    /// object (includes the terminal `EndOfObject` state).
    #[error("not positioned before a field (state: {state:?})")]
    NotBeforeField { state: State },

    /// `next_array_value` was called while the cursor was not inside
    /// an array.
    #[error("not positioned before an array value (state: {state:?})")]
    NotBeforeArrayValue { state: State },

    /// `enter_object` was called without a just-read, unentered Object
    /// value.
    #[error("no pending Object to enter (state: {state:?})")]
    NotAnObject { state: State },

    /// `enter_array` was called without a just-read, unentered Array
    /// value.
    #[error("no pending Array to enter (state: {state:?})")]
    NotAnArray { state: State },

    /// An ascend operation was called from a state it cannot drain to a
    /// container end (e.g. with an unentered container value pending).
    #[error("cursor is not at a container end (state: {state:?})")]
    NotAtContainerEnd { state: State },

    /// A previous call already failed; the instance is in an undefined
    /// position in the stream and must be discarded.
    #[error("decoder previously failed and must be discarded")]
    Poisoned,

    /// A malformed signature byte or an out-of-range String/Bytes
    /// length.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
