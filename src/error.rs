//! Error types

use thiserror::Error;

/// Error parsing an invalid string or byte representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum ParseError {
    /// The string is not exactly 36 characters long.
    #[error("invalid string representation: expected 36 characters, found {0}")]
    InvalidLength(usize),

    /// A non-hexadecimal character appears where a digit is expected.
    #[error("invalid string representation: unexpected character at {0}")]
    InvalidCharacter(usize),

    /// A hyphen is missing at one of the offsets 8, 13, 18 and 23.
    #[error("invalid string representation: hyphen expected at {0}")]
    MissingHyphen(usize),

    /// Fewer than 16 bytes are available from the offset given.
    #[error("invalid byte representation: 16 bytes required, {0} available")]
    ShortBuffer(usize),
}

/// General error type of this crate.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum Error {
    /// A string or byte representation could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An argument is out of range or not applicable to the requested version.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An operation is not allowed in the current state.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}
