use crate::sig;

/// Width class of an Integer value or a String/Bytes length prefix.
///
/// Binson stores both integers and length prefixes as signed
/// two's-complement little-endian values in one of four fixed widths.
/// The class is carried in the low two bits of the signature byte.
///
/// # Wire format examples
///
/// | Value | Signature | Payload bytes      | Class |
/// |-------|-----------|--------------------|-------|
/// | 0     | `0x10`    | `[0x00]`           | One   |
/// | 127   | `0x10`    | `[0x7F]`           | One   |
/// | 128   | `0x11`    | `[0x80, 0x00]`     | Two   |
/// | -129  | `0x11`    | `[0x7F, 0xFF]`     | Two   |
/// | 32768 | `0x12`    | `[0x00, 0x80, 0x00, 0x00]` | Four |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthClass {
    One,
    Two,
    Four,
    Eight,
}

impl WidthClass {
    /// The smallest class whose signed range contains `value`.
    ///
    /// This is the class the encoder must pick. The decoder accepts any
    /// class as given and never re-validates minimality.
    #[must_use]
    pub fn for_value(value: i64) -> Self {
        if value >= i64::from(i8::MIN) && value <= i64::from(i8::MAX) {
            Self::One
        } else if value >= i64::from(i16::MIN) && value <= i64::from(i16::MAX) {
            Self::Two
        } else if value >= i64::from(i32::MIN) && value <= i64::from(i32::MAX) {
            Self::Four
        } else {
            Self::Eight
        }
    }

    /// Extract the class from the low two bits of a signature byte.
    #[must_use]
    pub fn from_tag(tag: u8) -> Self {
        match tag & sig::WIDTH_MASK {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Four,
            _ => Self::Eight,
        }
    }

    /// The two bits OR-ed into a base signature byte for this class.
    #[must_use]
    pub const fn tag_bits(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Four => 2,
            Self::Eight => 3,
        }
    }

    /// Number of payload bytes occupied by a value of this class.
    #[must_use]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Write `value` into `buf` as a little-endian integer of the given class.
///
/// Returns the number of bytes used (`class.num_bytes()`). Truncation to
/// the narrower widths keeps the low-order bytes, which is exact whenever
/// the value fits the class's signed range.
pub fn write_int(value: i64, class: WidthClass, buf: &mut [u8; 8]) -> usize {
    *buf = value.to_le_bytes();
    class.num_bytes()
}

/// Read a little-endian integer of the given class from the front of
/// `buf`, sign-extending to `i64`.
#[must_use]
pub fn read_int(class: WidthClass, buf: &[u8; 8]) -> i64 {
    match class {
        #[allow(clippy::cast_possible_wrap)]
        WidthClass::One => i64::from(buf[0] as i8),
        WidthClass::Two => i64::from(i16::from_le_bytes([buf[0], buf[1]])),
        WidthClass::Four => i64::from(i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])),
        WidthClass::Eight => i64::from_le_bytes(*buf),
    }
}
