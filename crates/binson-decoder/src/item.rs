/// One decoded value at the cursor position.
///
/// Scalar variants carry their fully decoded payload; `Array` and
/// `Object` carry nothing, because container contents are only
/// discovered by descending with [`Decoder::enter_array`] /
/// [`Decoder::enter_object`]. Each read returns a fresh `Item`, so a
/// value can never be silently overwritten by a later call.
///
/// [`Decoder::enter_array`]: crate::Decoder::enter_array
/// [`Decoder::enter_object`]: crate::Decoder::enter_object
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Boolean(bool),
    Integer(i64),
    /// Note that `PartialEq` on this variant follows IEEE-754 semantics:
    /// NaN != NaN. Compare raw bits when identity matters.
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    /// An array value, not yet entered.
    Array,
    /// An object value, not yet entered.
    Object,
}

/// The type tag of an [`Item`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Boolean,
    Integer,
    Double,
    String,
    Bytes,
    Array,
    Object,
}

impl Item {
    /// The type tag of this item.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Boolean(_) => ItemKind::Boolean,
            Item::Integer(_) => ItemKind::Integer,
            Item::Double(_) => ItemKind::Double,
            Item::String(_) => ItemKind::String,
            Item::Bytes(_) => ItemKind::Bytes,
            Item::Array => ItemKind::Array,
            Item::Object => ItemKind::Object,
        }
    }
}

/// A named value inside an object: the unit [`Decoder::next_field`]
/// yields. Field names are returned in stream order; the decoder does
/// not require them to be unique or sorted.
///
/// [`Decoder::next_field`]: crate::Decoder::next_field
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Item,
}
