//! raw table bytes

use std::ops::{Bound, RangeBounds};

use crate::raw::{FixedSize, Scalar};
use crate::read::ReadError;

/// A reference to raw binary name table data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

impl<'a> TableData<'a> {
    /// Create a new `TableData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        TableData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of this data relative to the start of the original buffer.
    pub fn position(&self) -> u32 {
        self.total_pos
    }

    pub fn split_off(&self, pos: usize) -> Option<TableData<'a>> {
        self.bytes.get(pos..).map(|bytes| TableData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<TableData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| TableData { bytes, total_pos })
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..offset.saturating_add(T::RAW_BYTE_LEN))
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Interpret `count` items starting at `offset` as a slice of `T`.
    pub fn read_array<T>(&self, offset: usize, count: usize) -> Result<&'a [T], ReadError>
    where
        T: bytemuck::AnyBitPattern + FixedSize,
    {
        let len = count
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let bytes = self
            .bytes
            .get(offset..offset.saturating_add(len))
            .ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for TableData<'a> {
    fn from(src: &'a [u8]) -> TableData<'a> {
        TableData::new(src)
    }
}
