//! Error types for the witness transaction codec

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CodecError {
    #[error("Malformed input: {0}")]
    MalformedInput(Cow<'static, str>),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(Cow<'static, str>),

    #[error("Out of bounds: needed {needed} bytes, {remaining} remaining")]
    OutOfBounds { needed: usize, remaining: usize },

    #[error("Transaction has unexpected data: {remaining} trailing bytes")]
    TrailingData { remaining: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(Cow<'static, str>),

    #[error("Witness count mismatch: {inputs} inputs, {witnesses} witnesses")]
    WitnessCountMismatch { inputs: usize, witnesses: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
