#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::Encoder;
pub use error::EncodeError;
