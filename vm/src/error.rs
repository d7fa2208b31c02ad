use std::{backtrace::Backtrace, fmt::Display, panic::Location};

pub use rv32i_common::error::*;

use thiserror::Error;

#[derive(Debug)]
pub struct VMError {
    pub source: VMErrorKind,
    pub location: &'static Location<'static>,
    pub backtrace: Backtrace,
}

impl Display for VMError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the backtrace is left to Debug
        write!(f, "{} at {}", self.source, self.location)
    }
}

impl core::error::Error for VMError {}

impl<T> From<T> for VMError
where
    T: Into<VMErrorKind>,
{
    #[track_caller]
    fn from(source: T) -> Self {
        VMError {
            source: source.into(),
            location: Location::caller(),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Errors related to VM operations.
#[derive(Debug, Error)]
pub enum VMErrorKind {
    #[error("Wrapped MemoryError: {0}")]
    MemoryError(#[from] MemoryError),

    #[error("Wrapped OpcodeError: {0}")]
    OpcodeError(#[from] OpcodeError),

    // Reading the binary image failed
    #[error("Unable to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for VM functions that can produce errors.
pub type Result<T, E = VMError> = std::result::Result<T, E>;
