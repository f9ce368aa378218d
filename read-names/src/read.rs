//! Traits for interpreting name table data

use crate::table_data::TableData;

/// A type that can be read from raw table data.
///
/// Implementations are responsible for ensuring the input data is
/// consistent: that the version is known, and that any array lengths
/// declared in the header are not out-of-bounds.
pub trait TableRead<'a>: Sized {
    /// Read an instace of `Self` from the provided data, performing validation.
    fn read(data: TableData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading name table data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    OutOfBounds,
    // i64 is flexible enough to store any value we might encounter
    InvalidFormat(i64),
    InvalidArrayLen,
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadError {}
