//! Signature bytes of the Binson wire format.
//!
//! Every item in a Binson stream starts with exactly one signature byte.
//! Structural markers and booleans are a single fixed byte; Integer,
//! String and Bytes signatures carry a width class in their low two bits.
//!
//! ```text
//! ┌───────────────────┬───────────┬────────────────────────────────────┐
//! │ Item              │ Byte      │ Payload                            │
//! ├───────────────────┼───────────┼────────────────────────────────────┤
//! │ Object begin/end  │ 0x40/0x41 │ none                               │
//! │ Array begin/end   │ 0x42/0x43 │ none                               │
//! │ Boolean true/false│ 0x44/0x45 │ none                               │
//! │ Double            │ 0x46      │ 8 bytes, IEEE-754 little-endian    │
//! │ Integer           │ 0x10+w    │ 1/2/4/8 LE signed bytes            │
//! │ String            │ 0x14+w    │ length prefix, then UTF-8 bytes    │
//! │ Bytes             │ 0x18+w    │ length prefix, then raw bytes      │
//! └───────────────────┴───────────┴────────────────────────────────────┘
//! ```
//!
//! The bytes are stored as plain `u8` constants rather than an enum so the
//! encoder can compose `BASE | width_bits` directly.

/// Object begin marker (`{`).
pub const OBJECT_BEGIN: u8 = 0x40;

/// Object end marker (`}`).
pub const OBJECT_END: u8 = 0x41;

/// Array begin marker (`[`).
pub const ARRAY_BEGIN: u8 = 0x42;

/// Array end marker (`]`).
pub const ARRAY_END: u8 = 0x43;

/// Boolean `true`.
pub const TRUE: u8 = 0x44;

/// Boolean `false`.
pub const FALSE: u8 = 0x45;

/// Double, followed by 8 raw IEEE-754 little-endian bytes.
pub const DOUBLE: u8 = 0x46;

/// Integer base signature; the low two bits select the width class.
pub const INTEGER_BASE: u8 = 0x10;

/// String base signature; the low two bits size the UTF-8 byte-length prefix.
pub const STRING_BASE: u8 = 0x14;

/// Bytes base signature; the low two bits size the raw-length prefix.
pub const BYTES_BASE: u8 = 0x18;

/// Mask isolating the width-class bits of an Integer/String/Bytes signature.
pub const WIDTH_MASK: u8 = 0x03;
