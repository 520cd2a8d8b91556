use std::io::{BufWriter, Write};

use binson_wire::sig;
use binson_wire::width::{self, WidthClass};

use crate::error::EncodeError;

/// Binson encoder — a stateless sequential byte emitter.
///
/// The encoder writes one item per call, in caller order, to a buffered
/// sink. It keeps no nesting state and performs no validation: matching
/// [`begin_object`](Self::begin_object)/[`end_object`](Self::end_object)
/// pairs and the name-before-value discipline inside objects are the
/// caller's responsibility, exactly as in the wire-format contract. The
/// payoff is that emission is a straight line of byte writes.
///
/// # Usage
///
/// ```rust
/// use binson_encoder::Encoder;
///
/// let mut out = Vec::new();
/// let mut enc = Encoder::new(&mut out);
/// enc.begin_object().unwrap();
/// enc.write_field_name("a").unwrap();
/// enc.write_integer(1).unwrap();
/// enc.end_object().unwrap();
/// enc.flush().unwrap();
/// drop(enc);
/// assert_eq!(out, [0x40, 0x14, 0x01, b'a', 0x10, 0x01, 0x41]);
/// ```
///
/// # Buffering
///
/// Output goes through an internal [`BufWriter`]; call
/// [`flush`](Self::flush) (idempotent) when the document is complete or
/// trailing bytes may be lost with the buffer.
pub struct Encoder<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder writing to `w`, with buffering.
    pub fn new(w: W) -> Self {
        Self {
            out: BufWriter::new(w),
        }
    }

    /// Write the Object begin marker (`0x40`).
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if the sink rejects the write; the
    /// same applies to every other method on this type.
    pub fn begin_object(&mut self) -> Result<(), EncodeError> {
        self.out.write_all(&[sig::OBJECT_BEGIN])?;
        Ok(())
    }

    /// Write the Object end marker (`0x41`).
    pub fn end_object(&mut self) -> Result<(), EncodeError> {
        self.out.write_all(&[sig::OBJECT_END])?;
        Ok(())
    }

    /// Write the Array begin marker (`0x42`).
    pub fn begin_array(&mut self) -> Result<(), EncodeError> {
        self.out.write_all(&[sig::ARRAY_BEGIN])?;
        Ok(())
    }

    /// Write the Array end marker (`0x43`).
    pub fn end_array(&mut self) -> Result<(), EncodeError> {
        self.out.write_all(&[sig::ARRAY_END])?;
        Ok(())
    }

    /// Write a boolean value (`0x44` true, `0x45` false).
    pub fn write_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        let byte = if value { sig::TRUE } else { sig::FALSE };
        self.out.write_all(&[byte])?;
        Ok(())
    }

    /// Write a signed integer at its minimal width.
    ///
    /// The signature byte is `0x10 | width_bits` and the payload is the
    /// value in little-endian two's complement, 1/2/4/8 bytes.
    pub fn write_integer(&mut self, value: i64) -> Result<(), EncodeError> {
        self.write_sized(sig::INTEGER_BASE, value)
    }

    /// Write a double as `0x46` plus its 8 raw IEEE-754 little-endian
    /// bytes. The bit pattern passes through unmodified: NaN payloads,
    /// infinities and negative zero are preserved exactly.
    pub fn write_double(&mut self, value: f64) -> Result<(), EncodeError> {
        self.out.write_all(&[sig::DOUBLE])?;
        self.out.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    /// Write a string: length-prefix sized to the UTF-8 byte length
    /// (not the character count), then the UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) -> Result<(), EncodeError> {
        #[allow(clippy::cast_possible_wrap)]
        self.write_sized(sig::STRING_BASE, value.len() as i64)?;
        self.out.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Write a raw byte string: length-prefix, then the bytes.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), EncodeError> {
        #[allow(clippy::cast_possible_wrap)]
        self.write_sized(sig::BYTES_BASE, value.len() as i64)?;
        self.out.write_all(value)?;
        Ok(())
    }

    /// Write a field name. Identical wire encoding to
    /// [`write_string`](Self::write_string); the distinction is purely
    /// the calling convention (a name must precede a value inside an
    /// object).
    pub fn write_field_name(&mut self, name: &str) -> Result<(), EncodeError> {
        self.write_string(name)
    }

    /// Flush buffered bytes to the underlying sink.
    ///
    /// Must be called once the document is complete. Idempotent: flushing
    /// an already-flushed encoder writes nothing.
    pub fn flush(&mut self) -> Result<(), EncodeError> {
        self.out.flush()?;
        Ok(())
    }

    /// Emit `base | width_bits` followed by `value` at its minimal width.
    /// Shared by integer values and String/Bytes length prefixes.
    fn write_sized(&mut self, base: u8, value: i64) -> Result<(), EncodeError> {
        let class = WidthClass::for_value(value);
        let mut buf = [0u8; 8];
        let n = width::write_int(value, class, &mut buf);
        self.out.write_all(&[base | class.tag_bits()])?;
        self.out.write_all(&buf[..n])?;
        Ok(())
    }
}
