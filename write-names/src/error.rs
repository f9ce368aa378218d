//! Errors that occur while building or writing name tables

use crate::validate::ValidationReport;

/// An error occured while building or writing name tables
#[derive(Debug)]
pub enum Error {
    /// A build option was out of range.
    InvalidOptions(&'static str),
    /// Keys were not added in strictly ascending order.
    KeyOutOfOrder { previous: u32, key: u32 },
    /// A block ends before it starts.
    InvalidBlock { start: u32, end: u32 },
    /// A block starts before the end of the previous block.
    BlockOutOfOrder { previous_end: u32, start: u32 },
    /// The tables could not be serialized.
    ValidationFailed(ValidationReport),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidOptions(msg) => write!(f, "Invalid build options: {msg}"),
            Error::KeyOutOfOrder { previous, key } => write!(
                f,
                "Key 0x{key:04X} added after 0x{previous:04X}; keys must be strictly ascending"
            ),
            Error::InvalidBlock { start, end } => {
                write!(f, "Block 0x{start:04X}..=0x{end:04X} ends before it starts")
            }
            Error::BlockOutOfOrder {
                previous_end,
                start,
            } => write!(
                f,
                "Block starting at 0x{start:04X} overlaps or precedes the block ending at 0x{previous_end:04X}"
            ),
            Error::ValidationFailed(report) => std::fmt::Display::fmt(report, f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ValidationReport> for Error {
    fn from(src: ValidationReport) -> Error {
        Error::ValidationFailed(src)
    }
}
