use crate::error::WireError;
use crate::sig;
use crate::width::WidthClass;

/// A classified signature byte.
///
/// [`Tag::from_byte`] is the single place a raw byte is mapped into the
/// grammar; anything it rejects is a malformed stream, not a usage error.
/// Integer/String/Bytes tags carry the width class decoded from their
/// low two bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    True,
    False,
    Double,
    Integer(WidthClass),
    String(WidthClass),
    Bytes(WidthClass),
}

impl Tag {
    /// Classify a signature byte.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedTag`] for any byte outside the
    /// signature table.
    pub fn from_byte(byte: u8) -> Result<Self, WireError> {
        match byte {
            sig::OBJECT_BEGIN => Ok(Self::ObjectBegin),
            sig::OBJECT_END => Ok(Self::ObjectEnd),
            sig::ARRAY_BEGIN => Ok(Self::ArrayBegin),
            sig::ARRAY_END => Ok(Self::ArrayEnd),
            sig::TRUE => Ok(Self::True),
            sig::FALSE => Ok(Self::False),
            sig::DOUBLE => Ok(Self::Double),
            _ => match byte & !sig::WIDTH_MASK {
                sig::INTEGER_BASE => Ok(Self::Integer(WidthClass::from_tag(byte))),
                sig::STRING_BASE => Ok(Self::String(WidthClass::from_tag(byte))),
                sig::BYTES_BASE => Ok(Self::Bytes(WidthClass::from_tag(byte))),
                _ => Err(WireError::UnexpectedTag { found: byte }),
            },
        }
    }
}
