#![warn(clippy::pedantic)]

pub mod error;
pub mod limits;
pub mod sig;
pub mod tag;
pub mod width;

pub use error::WireError;
pub use tag::Tag;
pub use width::WidthClass;
