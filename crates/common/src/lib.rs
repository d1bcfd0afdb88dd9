//! Common types, token layout constants, and errors shared across the sealed-token crates.

pub mod error;
pub mod protocol;

pub use error::CodecError;
