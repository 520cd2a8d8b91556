use std::io::{BufReader, ErrorKind, Read};

use binson_wire::limits;
use binson_wire::sig;
use binson_wire::tag::Tag;
use binson_wire::width::{self, WidthClass};

use crate::error::DecodeError;
use crate::item::{Field, Item};

/// Cursor position of a [`Decoder`] within the document structure.
///
/// The machine is deliberately depth-oblivious: it only distinguishes
/// what the cursor is positioned before, never how deep it is. Absolute
/// depth lives in the caller's own loop/recursion nesting, which keeps
/// the decoder O(1) in memory for arbitrarily deep documents.
///
/// ```text
///              next_field / next_array_value
///   Start ──► BeforeField ◄────────────────► PendingObject ──enter──► BeforeField
///                 │        (container value)  PendingArray ──enter──► BeforeArrayValue
///                 │ (end marker)
///                 ▼
///            EndOfObject ──up_to_*──► parent continuation
/// ```
///
/// `EndOfObject`/`EndOfArray` are terminal for the current container:
/// no further read succeeds there, only an ascend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing read yet; the root Object-begin byte is still in the stream.
    Start,
    /// Inside an object, before the next field or the closing marker.
    BeforeField,
    /// Inside an array, before the next element or the closing marker.
    BeforeArrayValue,
    /// The last value read was an Object, not yet entered.
    PendingObject,
    /// The last value read was an Array, not yet entered.
    PendingArray,
    /// The innermost object's end marker has been consumed.
    EndOfObject,
    /// The innermost array's end marker has been consumed.
    EndOfArray,
}

/// Streaming Binson decoder — a forward-only cursor over one byte stream.
///
/// The decoder pulls bytes lazily, one signature at a time, and always
/// consumes exactly the bytes belonging to the current item before
/// returning. Scalars are decoded eagerly into an [`Item`]; container
/// values are *not* traversed until the caller descends, which is what
/// makes large-document streaming possible without materializing a tree.
/// A container value the caller never enters is skipped implicitly (and
/// in full) by the next read on its parent.
///
/// One instance is bound to one stream and consumed exactly once, start
/// to end; it is not reusable, rewindable, or safe to share across
/// threads. The first error leaves the cursor at an undefined stream
/// position, so the instance latches it and every subsequent call
/// returns [`DecodeError::Poisoned`].
///
/// # Example
///
/// ```rust
/// use binson_decoder::{Decoder, Item};
///
/// // {"a": 1, "b": {"c": 3}, "d": 4}
/// let bytes: &[u8] = &[
///     0x40, 0x14, 0x01, b'a', 0x10, 0x01, 0x14, 0x01, b'b', 0x40, 0x14,
///     0x01, b'c', 0x10, 0x03, 0x41, 0x14, 0x01, b'd', 0x10, 0x04, 0x41,
/// ];
/// let mut dec = Decoder::new(bytes);
/// // Seeking "d" skips the whole unread object at "b".
/// assert_eq!(dec.find_field("d").unwrap(), Some(Item::Integer(4)));
/// ```
pub struct Decoder<R: Read> {
    reader: BufReader<R>,
    state: State,
    poisoned: bool,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder reading from `r`, with buffering.
    pub fn new(r: R) -> Self {
        Self {
            reader: BufReader::new(r),
            state: State::Start,
            poisoned: false,
        }
    }

    /// The cursor's current navigation state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Consume the decoder and return the underlying buffered reader.
    ///
    /// Useful after a complete walk to check for trailing bytes past the
    /// root object's end marker, which the decoder itself never reads.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }

    /// Read the next field of the innermost object.
    ///
    /// From [`State::Start`] this first consumes the mandatory root
    /// Object-begin byte. If the previous field's value was a container
    /// the caller never entered, that container is fully skipped first.
    /// Returns `Ok(None)` when the object's end marker is reached,
    /// leaving the cursor at [`State::EndOfObject`].
    ///
    /// # Errors
    ///
    /// Usage error if the cursor is not logically inside an object;
    /// format error on a malformed stream; [`DecodeError::Poisoned`]
    /// after any earlier failure.
    pub fn next_field(&mut self) -> Result<Option<Field>, DecodeError> {
        self.guard()?;
        self.latch(Self::next_field_inner)
    }

    /// Read the next element of the innermost array. Symmetric to
    /// [`next_field`](Self::next_field), without a name; `Ok(None)`
    /// means the array's end marker was reached
    /// ([`State::EndOfArray`]).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`next_field`](Self::next_field).
    pub fn next_array_value(&mut self) -> Result<Option<Item>, DecodeError> {
        self.guard()?;
        self.latch(Self::next_array_value_inner)
    }

    /// Scan forward for a field named `name` in the innermost object.
    ///
    /// A linear scan over [`next_field`](Self::next_field): every field
    /// before the match, nested containers included, is consumed and
    /// discarded. `Ok(None)` means the name was absent; the cursor is
    /// then at [`State::EndOfObject`] and that is *not* a fatal error.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`next_field`](Self::next_field).
    pub fn find_field(&mut self, name: &str) -> Result<Option<Item>, DecodeError> {
        while let Some(field) = self.next_field()? {
            if field.name == name {
                return Ok(Some(field.value));
            }
        }
        Ok(None)
    }

    /// Descend into the Object value read by the previous call.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotAnObject`] unless the cursor is at
    /// [`State::PendingObject`].
    pub fn enter_object(&mut self) -> Result<(), DecodeError> {
        self.guard()?;
        self.latch(|d| {
            if d.state != State::PendingObject {
                return Err(DecodeError::NotAnObject { state: d.state });
            }
            d.state = State::BeforeField;
            Ok(())
        })
    }

    /// Descend into the Array value read by the previous call.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotAnArray`] unless the cursor is at
    /// [`State::PendingArray`].
    pub fn enter_array(&mut self) -> Result<(), DecodeError> {
        self.guard()?;
        self.latch(|d| {
            if d.state != State::PendingArray {
                return Err(DecodeError::NotAnArray { state: d.state });
            }
            d.state = State::BeforeArrayValue;
            Ok(())
        })
    }

    /// Leave the current container and continue in the parent, which
    /// the caller asserts is an object.
    ///
    /// Any unread siblings in the current container are drained first;
    /// calling directly from [`State::EndOfObject`]/[`State::EndOfArray`]
    /// ascends without reading. The decoder does not verify the asserted
    /// parent kind against the actual structure: tracking nesting is the
    /// caller's contract, and asserting the wrong kind desynchronizes
    /// the cursor rather than producing an immediate error.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotAtContainerEnd`] if called with an unentered
    /// container value pending, plus the usual format-error taxonomy
    /// while draining.
    pub fn up_to_object(&mut self) -> Result<(), DecodeError> {
        self.guard()?;
        self.latch(|d| d.ascend(State::BeforeField))
    }

    /// Leave the current container and continue in the parent, which
    /// the caller asserts is an array. See
    /// [`up_to_object`](Self::up_to_object) for the contract.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`up_to_object`](Self::up_to_object).
    pub fn up_to_array(&mut self) -> Result<(), DecodeError> {
        self.guard()?;
        self.latch(|d| d.ascend(State::BeforeArrayValue))
    }

    // ── state machine internals ──────────────────────────────────────────

    fn next_field_inner(&mut self) -> Result<Option<Field>, DecodeError> {
        match self.state {
            State::Start => {
                let byte = self.read_byte()?;
                if byte != sig::OBJECT_BEGIN {
                    return Err(DecodeError::MissingRootObject { found: byte });
                }
                self.state = State::BeforeField;
            }
            State::PendingObject | State::PendingArray => {
                self.skip_container()?;
                self.state = State::BeforeField;
            }
            State::BeforeField => {}
            other => return Err(DecodeError::NotBeforeField { state: other }),
        }

        let byte = self.read_byte()?;
        if byte == sig::OBJECT_END {
            self.state = State::EndOfObject;
            return Ok(None);
        }
        let name = match Tag::from_byte(byte)? {
            Tag::String(class) => self.read_string(class)?,
            _ => return Err(DecodeError::FieldNameNotString { found: byte }),
        };

        let byte = self.read_byte()?;
        let value = self.read_value(byte, State::BeforeField)?;
        Ok(Some(Field { name, value }))
    }

    fn next_array_value_inner(&mut self) -> Result<Option<Item>, DecodeError> {
        match self.state {
            State::PendingObject | State::PendingArray => {
                self.skip_container()?;
                self.state = State::BeforeArrayValue;
            }
            State::BeforeArrayValue => {}
            other => return Err(DecodeError::NotBeforeArrayValue { state: other }),
        }

        let byte = self.read_byte()?;
        if byte == sig::ARRAY_END {
            self.state = State::EndOfArray;
            return Ok(None);
        }
        let value = self.read_value(byte, State::BeforeArrayValue)?;
        Ok(Some(value))
    }

    /// Drain the current container to its end marker, then reposition
    /// to the continuation state the caller asserted.
    fn ascend(&mut self, continuation: State) -> Result<(), DecodeError> {
        if self.state == State::BeforeArrayValue {
            while self.next_array_value_inner()?.is_some() {}
        }
        if self.state == State::BeforeField {
            while self.next_field_inner()?.is_some() {}
        }
        match self.state {
            State::EndOfObject | State::EndOfArray => {
                self.state = continuation;
                Ok(())
            }
            other => Err(DecodeError::NotAtContainerEnd { state: other }),
        }
    }

    /// Decode one value whose signature byte has already been read.
    /// Scalars set `after`; containers set the matching pending state
    /// instead (their bytes stay in the stream until entered or
    /// skipped). End markers are malformed in value position.
    fn read_value(&mut self, byte: u8, after: State) -> Result<Item, DecodeError> {
        let item = match Tag::from_byte(byte)? {
            Tag::ObjectBegin => {
                self.state = State::PendingObject;
                return Ok(Item::Object);
            }
            Tag::ArrayBegin => {
                self.state = State::PendingArray;
                return Ok(Item::Array);
            }
            Tag::ObjectEnd | Tag::ArrayEnd => {
                return Err(binson_wire::WireError::UnexpectedTag { found: byte }.into());
            }
            Tag::True => Item::Boolean(true),
            Tag::False => Item::Boolean(false),
            Tag::Double => Item::Double(self.read_double()?),
            Tag::Integer(class) => Item::Integer(self.read_int(class)?),
            Tag::String(class) => Item::String(self.read_string(class)?),
            Tag::Bytes(class) => Item::Bytes(self.read_raw(class)?),
        };
        self.state = after;
        Ok(item)
    }

    /// Fast-forward past one container whose begin byte is already
    /// consumed.
    ///
    /// Iterative with an explicit depth counter, so a maliciously deep
    /// document cannot grow the call stack. This is a byte-level skim:
    /// tags and length prefixes are still validated, payloads are
    /// discarded without allocation, but field names are not
    /// re-checked as strings and end-marker kinds are not matched
    /// against begin kinds.
    fn skip_container(&mut self) -> Result<(), DecodeError> {
        let mut depth: u64 = 1;
        while depth > 0 {
            let byte = self.read_byte()?;
            match Tag::from_byte(byte)? {
                Tag::ObjectBegin | Tag::ArrayBegin => depth += 1,
                Tag::ObjectEnd | Tag::ArrayEnd => depth -= 1,
                Tag::True | Tag::False => {}
                Tag::Double => self.discard(8)?,
                Tag::Integer(class) => self.discard(class.num_bytes() as u64)?,
                Tag::String(class) | Tag::Bytes(class) => {
                    let len = self.read_len(class)?;
                    self.discard(len as u64)?;
                }
            }
        }
        Ok(())
    }

    // ── byte-level reads ─────────────────────────────────────────────────

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let mut byte = [0u8; 1];
        self.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        self.reader.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                DecodeError::UnexpectedEof
            } else {
                DecodeError::Io(e)
            }
        })
    }

    fn read_int(&mut self, class: WidthClass) -> Result<i64, DecodeError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf[..class.num_bytes()])?;
        Ok(width::read_int(class, &buf))
    }

    fn read_double(&mut self) -> Result<f64, DecodeError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    /// Read and bounds-check a String/Bytes length prefix. The ceiling
    /// check runs before any allocation.
    fn read_len(&mut self, class: WidthClass) -> Result<usize, DecodeError> {
        let length = self.read_int(class)?;
        Ok(limits::validate_len(length)?)
    }

    fn read_raw(&mut self, class: WidthClass) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_len(class)?;
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_string(&mut self, class: WidthClass) -> Result<String, DecodeError> {
        let buf = self.read_raw(class)?;
        String::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Read and throw away `n` payload bytes.
    fn discard(&mut self, n: u64) -> Result<(), DecodeError> {
        let copied = std::io::copy(&mut (&mut self.reader).take(n), &mut std::io::sink())?;
        if copied < n {
            return Err(DecodeError::UnexpectedEof);
        }
        Ok(())
    }

    // ── error latching ───────────────────────────────────────────────────

    fn guard(&self) -> Result<(), DecodeError> {
        if self.poisoned {
            return Err(DecodeError::Poisoned);
        }
        Ok(())
    }

    fn latch<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let result = f(self);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binson_encoder::Encoder;

    /// Helper: {"a": true, "b": "x"} as raw bytes.
    fn two_field_doc() -> Vec<u8> {
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.begin_object().unwrap();
        enc.write_field_name("a").unwrap();
        enc.write_bool(true).unwrap();
        enc.write_field_name("b").unwrap();
        enc.write_string("x").unwrap();
        enc.end_object().unwrap();
        enc.flush().unwrap();
        drop(enc);
        out
    }

    #[test]
    fn walks_flat_object_in_stream_order() {
        let bytes = two_field_doc();
        let mut dec = Decoder::new(bytes.as_slice());

        let field = dec.next_field().unwrap().unwrap();
        assert_eq!(field.name, "a");
        assert_eq!(field.value, Item::Boolean(true));

        let field = dec.next_field().unwrap().unwrap();
        assert_eq!(field.name, "b");
        assert_eq!(field.value, Item::String("x".into()));

        assert!(dec.next_field().unwrap().is_none());
        assert_eq!(dec.state(), State::EndOfObject);
    }

    #[test]
    fn root_must_be_object_begin() {
        let mut dec = Decoder::new([0x42u8, 0x43].as_slice());
        let err = dec.next_field().unwrap_err();
        assert!(matches!(err, DecodeError::MissingRootObject { found: 0x42 }));
    }

    #[test]
    fn reading_past_end_of_object_is_a_usage_error() {
        let bytes = two_field_doc();
        let mut dec = Decoder::new(bytes.as_slice());
        while dec.next_field().unwrap().is_some() {}
        let err = dec.next_field().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::NotBeforeField {
                state: State::EndOfObject
            }
        ));
    }

    #[test]
    fn unentered_container_is_skipped_implicitly() {
        // {"obj": {"inner": 1}, "tail": 2}
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.begin_object().unwrap();
        enc.write_field_name("obj").unwrap();
        enc.begin_object().unwrap();
        enc.write_field_name("inner").unwrap();
        enc.write_integer(1).unwrap();
        enc.end_object().unwrap();
        enc.write_field_name("tail").unwrap();
        enc.write_integer(2).unwrap();
        enc.end_object().unwrap();
        enc.flush().unwrap();
        drop(enc);

        let mut dec = Decoder::new(out.as_slice());
        let field = dec.next_field().unwrap().unwrap();
        assert_eq!(field.value, Item::Object);
        assert_eq!(dec.state(), State::PendingObject);

        // Not entering "obj": the next read must consume it whole.
        let field = dec.next_field().unwrap().unwrap();
        assert_eq!(field.name, "tail");
        assert_eq!(field.value, Item::Integer(2));
    }

    #[test]
    fn enter_and_ascend_object() {
        // {"obj": {"inner": 1, "extra": 2}, "tail": 3}
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.begin_object().unwrap();
        enc.write_field_name("obj").unwrap();
        enc.begin_object().unwrap();
        enc.write_field_name("inner").unwrap();
        enc.write_integer(1).unwrap();
        enc.write_field_name("extra").unwrap();
        enc.write_integer(2).unwrap();
        enc.end_object().unwrap();
        enc.write_field_name("tail").unwrap();
        enc.write_integer(3).unwrap();
        enc.end_object().unwrap();
        enc.flush().unwrap();
        drop(enc);

        let mut dec = Decoder::new(out.as_slice());
        assert_eq!(dec.find_field("obj").unwrap(), Some(Item::Object));
        dec.enter_object().unwrap();
        assert_eq!(dec.find_field("inner").unwrap(), Some(Item::Integer(1)));
        // "extra" is still unread; up_to_object drains it.
        dec.up_to_object().unwrap();
        assert_eq!(dec.find_field("tail").unwrap(), Some(Item::Integer(3)));
    }

    #[test]
    fn enter_object_requires_pending_object() {
        let bytes = two_field_doc();
        let mut dec = Decoder::new(bytes.as_slice());
        dec.next_field().unwrap();
        let err = dec.enter_object().unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject { .. }));
    }

    #[test]
    fn ascend_with_pending_container_is_an_error() {
        // {"obj": {}} — read the field, don't enter, then try to ascend.
        let bytes: &[u8] = &[0x40, 0x14, 0x03, b'o', b'b', b'j', 0x40, 0x41, 0x41];
        let mut dec = Decoder::new(bytes);
        dec.next_field().unwrap();
        assert_eq!(dec.state(), State::PendingObject);
        let err = dec.up_to_object().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::NotAtContainerEnd {
                state: State::PendingObject
            }
        ));
    }

    #[test]
    fn first_error_poisons_the_instance() {
        let mut dec = Decoder::new([0x00u8].as_slice());
        assert!(dec.next_field().is_err());
        let err = dec.next_field().unwrap_err();
        assert!(matches!(err, DecodeError::Poisoned));
        let err = dec.enter_object().unwrap_err();
        assert!(matches!(err, DecodeError::Poisoned));
    }

    #[test]
    fn eof_inside_an_item_is_an_error() {
        // Root begin, name "a", integer signature, but no payload byte.
        let bytes: &[u8] = &[0x40, 0x14, 0x01, b'a', 0x10];
        let mut dec = Decoder::new(bytes);
        let err = dec.next_field().unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof));
    }

    #[test]
    fn non_string_field_name_is_rejected() {
        // {123: ...} — an integer where a name must be.
        let bytes: &[u8] = &[0x40, 0x10, 0x7B, 0x10, 0x01, 0x41];
        let mut dec = Decoder::new(bytes);
        let err = dec.next_field().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldNameNotString { found: 0x10 }
        ));
    }

    #[test]
    fn oversized_length_rejected_before_allocation() {
        // "a" field with a String value claiming ~2^31 bytes (4-byte class).
        let bytes: &[u8] = &[0x40, 0x14, 0x01, b'a', 0x16, 0xFF, 0xFF, 0xFF, 0x7F];
        let mut dec = Decoder::new(bytes);
        let err = dec.next_field().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Wire(binson_wire::WireError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn non_minimal_integer_width_is_accepted() {
        // {"a": 5} with the 5 spelled as an 8-byte integer.
        let bytes: &[u8] = &[
            0x40, 0x14, 0x01, b'a', 0x13, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x41,
        ];
        let mut dec = Decoder::new(bytes);
        let field = dec.next_field().unwrap().unwrap();
        assert_eq!(field.value, Item::Integer(5));
        assert!(dec.next_field().unwrap().is_none());
    }

    #[test]
    fn array_walk_and_end_state() {
        // {"arr": [true, 7]}
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.begin_object().unwrap();
        enc.write_field_name("arr").unwrap();
        enc.begin_array().unwrap();
        enc.write_bool(true).unwrap();
        enc.write_integer(7).unwrap();
        enc.end_array().unwrap();
        enc.end_object().unwrap();
        enc.flush().unwrap();
        drop(enc);

        let mut dec = Decoder::new(out.as_slice());
        assert_eq!(dec.find_field("arr").unwrap(), Some(Item::Array));
        dec.enter_array().unwrap();
        assert_eq!(dec.next_array_value().unwrap(), Some(Item::Boolean(true)));
        assert_eq!(dec.next_array_value().unwrap(), Some(Item::Integer(7)));
        assert_eq!(dec.next_array_value().unwrap(), None);
        assert_eq!(dec.state(), State::EndOfArray);
        dec.up_to_object().unwrap();
        assert!(dec.next_field().unwrap().is_none());
    }

    #[test]
    fn deeply_nested_skip_does_not_recurse() {
        // {"deep": [[[[...]]]], "tail": 1} with 10_000 nested arrays.
        // The iterative skip must handle this without stack growth.
        const DEPTH: usize = 10_000;
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.begin_object().unwrap();
        enc.write_field_name("deep").unwrap();
        for _ in 0..DEPTH {
            enc.begin_array().unwrap();
        }
        for _ in 0..DEPTH {
            enc.end_array().unwrap();
        }
        enc.write_field_name("tail").unwrap();
        enc.write_integer(1).unwrap();
        enc.end_object().unwrap();
        enc.flush().unwrap();
        drop(enc);

        let mut dec = Decoder::new(out.as_slice());
        assert_eq!(dec.find_field("tail").unwrap(), Some(Item::Integer(1)));
    }
}
