#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;
pub mod item;

pub use decoder::{Decoder, State};
pub use error::DecodeError;
pub use item::{Field, Item, ItemKind};
