//! The serialized name tables
//!
//! All values are big-endian. The layout is a fixed header followed by
//! three arrays and a block of string data:
//!
//! ```text
//! u16 version
//! u16 maxNameLength            longest reconstructed name, in bytes
//! u32 sequenceCount
//! u32 nameCount
//! u16 prefixCount
//! u16 blockCount
//! SequenceRecord[sequenceCount]
//! u32 prefixOffsets[prefixCount]
//! NameRecord[nameCount]
//! BlockRecord[blockCount]
//! u8  stringData[]             length-prefixed UTF-8 strings
//! ```
//!
//! String offsets are relative to the start of the string data.

use crate::raw::{BigEndian, FixedSize};
use crate::read::{ReadError, TableRead};
use crate::sequence::{self, SequenceRun};
use crate::table_data::TableData;

/// The only version of the table format currently defined.
pub const VERSION_1: u16 = 1;

/// The `prefixIndex` value of a name record without a prefix.
pub const NO_PREFIX: u16 = 0xFFFF;

/// The `suffixOffset` value of a name record whose suffix is the empty string.
///
/// This happens when a name is identical to its prefix. No bytes are stored
/// for the suffix; this marker is distinct from every real string offset.
pub const EMPTY_SUFFIX: u32 = 0xFFFF_FFFF;

/// The length of the table header, in bytes.
pub const HEADER_LEN: usize = 16;

/// The start of a run of consecutive keys.
#[derive(Clone, Copy, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct SequenceRecord {
    /// The first key in the run.
    pub key: BigEndian<u32>,
    /// The name table row of the first key in the run.
    pub name_index: BigEndian<u32>,
}

impl SequenceRecord {
    /// The first key in the run.
    pub fn key(&self) -> u32 {
        self.key.get()
    }

    /// The name table row of the first key in the run.
    pub fn name_index(&self) -> u32 {
        self.name_index.get()
    }
}

impl FixedSize for SequenceRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl SequenceRun for SequenceRecord {
    fn start_key(&self) -> u32 {
        self.key()
    }

    fn first_row(&self) -> u32 {
        self.name_index()
    }
}

impl std::fmt::Debug for SequenceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceRecord")
            .field("key", &self.key())
            .field("name_index", &self.name_index())
            .finish()
    }
}

/// One row of the name table: an optional shared prefix and a suffix.
#[derive(Clone, Copy, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct NameRecord {
    /// Index into the prefix offsets, or [`NO_PREFIX`].
    pub prefix_index: BigEndian<u16>,
    /// Offset of the suffix in the string data, or [`EMPTY_SUFFIX`].
    pub suffix_offset: BigEndian<u32>,
}

impl NameRecord {
    /// The index of this row's prefix, if it has one.
    pub fn prefix_index(&self) -> Option<u16> {
        let index = self.prefix_index.get();
        (index != NO_PREFIX).then_some(index)
    }

    /// The offset of this row's suffix, or `None` if the suffix is empty.
    pub fn suffix_offset(&self) -> Option<u32> {
        let offset = self.suffix_offset.get();
        (offset != EMPTY_SUFFIX).then_some(offset)
    }
}

impl FixedSize for NameRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl std::fmt::Debug for NameRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameRecord")
            .field("prefix_index", &self.prefix_index())
            .field("suffix_offset", &self.suffix_offset())
            .finish()
    }
}

/// A named, inclusive range of keys.
#[derive(Clone, Copy, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct BlockRecord {
    /// The first key in the block.
    pub start: BigEndian<u32>,
    /// The last key in the block.
    pub end: BigEndian<u32>,
    /// Offset of the block name in the string data.
    pub name_offset: BigEndian<u32>,
}

impl BlockRecord {
    pub fn start(&self) -> u32 {
        self.start.get()
    }

    pub fn end(&self) -> u32 {
        self.end.get()
    }

    pub fn name_offset(&self) -> u32 {
        self.name_offset.get()
    }

    /// Returns `true` if `key` is within this block.
    pub fn contains(&self, key: u32) -> bool {
        (self.start()..=self.end()).contains(&key)
    }
}

impl FixedSize for BlockRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl std::fmt::Debug for BlockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRecord")
            .field("start", &self.start())
            .field("end", &self.end())
            .field("name_offset", &self.name_offset())
            .finish()
    }
}

/// A view over serialized name tables.
///
/// Construction validates the header and array bounds; strings are decoded
/// lazily, so individual lookups may still fail on malformed string data.
#[derive(Clone, Copy)]
pub struct NameTables<'a> {
    version: u16,
    max_name_len: u16,
    sequences: &'a [SequenceRecord],
    prefix_offsets: &'a [BigEndian<u32>],
    names: &'a [NameRecord],
    blocks: &'a [BlockRecord],
    string_data: TableData<'a>,
}

impl<'a> TableRead<'a> for NameTables<'a> {
    fn read(data: TableData<'a>) -> Result<Self, ReadError> {
        let version: u16 = data.read_at(0)?;
        if version != VERSION_1 {
            return Err(ReadError::InvalidFormat(version.into()));
        }
        let max_name_len: u16 = data.read_at(2)?;
        let sequence_count: u32 = data.read_at(4)?;
        let name_count: u32 = data.read_at(8)?;
        let prefix_count: u16 = data.read_at(12)?;
        let block_count: u16 = data.read_at(14)?;

        let mut pos = HEADER_LEN;
        let sequences: &[SequenceRecord] = data.read_array(pos, sequence_count as usize)?;
        pos += std::mem::size_of_val(sequences);
        let prefix_offsets: &[BigEndian<u32>] = data.read_array(pos, prefix_count as usize)?;
        pos += std::mem::size_of_val(prefix_offsets);
        let names: &[NameRecord] = data.read_array(pos, name_count as usize)?;
        pos += std::mem::size_of_val(names);
        let blocks: &[BlockRecord] = data.read_array(pos, block_count as usize)?;
        pos += std::mem::size_of_val(blocks);
        let string_data = data.split_off(pos).ok_or(ReadError::OutOfBounds)?;

        if let Some(first) = sequences.first() {
            if first.name_index() != 0 {
                return Err(ReadError::MalformedData(
                    "first sequence record must start at row 0",
                ));
            }
        }
        if sequences.is_empty() != names.is_empty() {
            return Err(ReadError::MalformedData(
                "sequence table and name table must both be empty or both be populated",
            ));
        }

        Ok(NameTables {
            version,
            max_name_len,
            sequences,
            prefix_offsets,
            names,
            blocks,
            string_data,
        })
    }
}

impl<'a> NameTables<'a> {
    /// Read the tables from raw bytes.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ReadError> {
        Self::read(TableData::new(bytes))
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    /// The length in bytes of the longest name in the tables.
    ///
    /// A buffer of this size is sufficient for [`Name::write_to`].
    pub fn max_name_len(&self) -> u16 {
        self.max_name_len
    }

    pub fn sequence_records(&self) -> &'a [SequenceRecord] {
        self.sequences
    }

    pub fn name_records(&self) -> &'a [NameRecord] {
        self.names
    }

    pub fn block_records(&self) -> &'a [BlockRecord] {
        self.blocks
    }

    /// The number of entries in the prefix pool.
    pub fn prefix_count(&self) -> u16 {
        self.prefix_offsets.len() as u16
    }

    /// The number of rows in the name table.
    pub fn name_count(&self) -> u32 {
        self.names.len() as u32
    }

    /// The prefix at `index` in the prefix pool.
    pub fn prefix(&self, index: u16) -> Result<&'a str, ReadError> {
        let offset = self
            .prefix_offsets
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?
            .get();
        self.string_at(offset)
    }

    /// The suffix string of a name record.
    pub fn suffix(&self, record: &NameRecord) -> Result<&'a str, ReadError> {
        match record.suffix_offset() {
            Some(offset) => self.string_at(offset),
            None => Ok(""),
        }
    }

    /// The name stored in the name table at `row`.
    pub fn row(&self, row: u32) -> Result<Name<'a>, ReadError> {
        let record = self
            .names
            .get(row as usize)
            .ok_or(ReadError::OutOfBounds)?;
        let prefix = record
            .prefix_index()
            .map(|index| self.prefix(index))
            .transpose()?;
        Ok(Name {
            prefix,
            suffix: self.suffix(record)?,
        })
    }

    /// The name of the block record at `index`.
    pub fn block(&self, index: usize) -> Result<&'a str, ReadError> {
        let record = self.blocks.get(index).ok_or(ReadError::OutOfBounds)?;
        self.string_at(record.name_offset())
    }

    /// The name of the block containing `key`, or `None` if no block does.
    ///
    /// Blocks are sorted and do not overlap, so this is a binary search.
    pub fn block_name(&self, key: u32) -> Option<&'a str> {
        let index = self
            .blocks
            .partition_point(|block| block.start() <= key)
            .checked_sub(1)?;
        if !self.blocks[index].contains(key) {
            return None;
        }
        self.block(index).ok()
    }

    /// The name row for `key`, or `None` if the key is unassigned.
    pub fn row_for_key(&self, key: u32) -> Option<u32> {
        sequence::find_row(self.sequences, self.name_count(), key)
    }

    /// The name for `key`, or `None` if the key is unassigned or the
    /// underlying data is malformed.
    pub fn name(&self, key: u32) -> Option<Name<'a>> {
        self.row_for_key(key).and_then(|row| self.row(row).ok())
    }

    /// Returns an iterator over all `(key, name)` pairs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Result<Name<'a>, ReadError>)> + 'a {
        let this = *self;
        sequence::iter_rows(self.sequences, self.name_count())
            .map(move |(key, row)| (key, this.row(row)))
    }

    fn string_at(&self, offset: u32) -> Result<&'a str, ReadError> {
        let offset = offset as usize;
        let len: u8 = self.string_data.read_at(offset)?;
        let bytes = self
            .string_data
            .as_bytes()
            .get(offset + 1..offset + 1 + len as usize)
            .ok_or(ReadError::OutOfBounds)?;
        std::str::from_utf8(bytes).map_err(|_| ReadError::MalformedData("Must be valid utf-8"))
    }
}

impl std::fmt::Debug for NameTables<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameTables")
            .field("version", &self.version)
            .field("max_name_len", &self.max_name_len)
            .field("sequence_count", &self.sequences.len())
            .field("name_count", &self.names.len())
            .field("prefix_count", &self.prefix_offsets.len())
            .field("block_count", &self.blocks.len())
            .finish()
    }
}

/// A name decoded from the tables.
///
/// This borrows both of its parts from the underlying data; nothing is
/// allocated. Use [`write_to`](Self::write_to) to join the parts into a
/// caller-provided buffer, or the `Display` impl to write them to a
/// formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Name<'a> {
    prefix: Option<&'a str>,
    suffix: &'a str,
}

impl<'a> Name<'a> {
    pub fn new(prefix: Option<&'a str>, suffix: &'a str) -> Self {
        Name { prefix, suffix }
    }

    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    pub fn suffix(&self) -> &'a str {
        self.suffix
    }

    /// The length of the full name, in bytes.
    pub fn len(&self) -> usize {
        self.prefix.map(str::len).unwrap_or_default() + self.suffix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the characters of the full name.
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        self.prefix
            .unwrap_or_default()
            .chars()
            .chain(self.suffix.chars())
    }

    /// Concatenate the name into `buf`, returning the joined string.
    ///
    /// Returns `None` if `buf` is too small.
    pub fn write_to<'b>(&self, buf: &'b mut [u8]) -> Option<&'b str> {
        let prefix = self.prefix.unwrap_or_default();
        let out = buf.get_mut(..self.len())?;
        let (head, tail) = out.split_at_mut(prefix.len());
        head.copy_from_slice(prefix.as_bytes());
        tail.copy_from_slice(self.suffix.as_bytes());
        std::str::from_utf8(out).ok()
    }
}

impl std::fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = self.prefix {
            f.write_str(prefix)?;
        }
        f.write_str(self.suffix)
    }
}

impl PartialEq<&str> for Name<'_> {
    fn eq(&self, other: &&str) -> bool {
        other
            .strip_prefix(self.prefix.unwrap_or_default())
            .is_some_and(|rest| rest == self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    use name_test_data::tables::{self as test_data, SIMPLE};

    #[test]
    fn read_header() {
        let tables = NameTables::new(SIMPLE).unwrap();
        assert_eq!(tables.version(), VERSION_1);
        assert_eq!(tables.max_name_len(), 22);
        assert_eq!(tables.sequence_records().len(), 2);
        assert_eq!(tables.name_count(), 3);
        assert_eq!(tables.prefix_count(), 1);
        assert_eq!(tables.prefix(0), Ok("Latin Capital Letter "));
        assert_eq!(tables.prefix(1), Err(ReadError::OutOfBounds));
        assert!(tables.block_records().is_empty());
        assert_eq!(tables.block_name(0x41), None);
    }

    #[test]
    fn lookup_names() {
        let tables = NameTables::new(SIMPLE).unwrap();
        let a = tables.name(0x41).unwrap();
        assert_eq!(a.prefix(), Some("Latin Capital Letter "));
        assert_eq!(a.suffix(), "A");
        assert_eq!(a, "Latin Capital Letter A");
        assert_eq!(tables.name(0x42).unwrap(), "Latin Capital Letter B");
        let face = tables.name(0x1F600).unwrap();
        assert_eq!(face.prefix(), None);
        assert_eq!(face, "Grinning Face");
    }

    #[test]
    fn unassigned_keys() {
        let tables = NameTables::new(SIMPLE).unwrap();
        assert!(tables.name(0x40).is_none());
        assert!(tables.name(0x43).is_none());
        assert!(tables.name(0x1F5FF).is_none());
        assert!(tables.name(0x1F601).is_none());
    }

    #[test]
    fn iterate() {
        let tables = NameTables::new(SIMPLE).unwrap();
        let keys = tables
            .iter()
            .map(|(key, name)| (key, name.unwrap().len()))
            .collect::<Vec<_>>();
        assert_eq!(keys, [(0x41, 22), (0x42, 22), (0x1F600, 13)]);
    }

    #[test]
    fn write_into_buffer() {
        let tables = NameTables::new(SIMPLE).unwrap();
        let mut buf = [0u8; 22];
        let name = tables.name(0x42).unwrap();
        assert_eq!(name.write_to(&mut buf), Some("Latin Capital Letter B"));
        assert_eq!(name.write_to(&mut buf[..10]), None);
    }

    #[test]
    fn empty_suffix_marker() {
        let record = NameRecord {
            prefix_index: 0u16.into(),
            suffix_offset: EMPTY_SUFFIX.into(),
        };
        let tables = NameTables::new(SIMPLE).unwrap();
        assert_eq!(record.suffix_offset(), None);
        assert_eq!(tables.suffix(&record), Ok(""));
    }

    #[test]
    fn name_equal_to_prefix() {
        let tables = NameTables::new(test_data::EMPTY_SUFFIX).unwrap();
        let record = tables.name_records()[0];
        assert_eq!(record.prefix_index(), Some(0));
        assert_eq!(record.suffix_offset(), None);
        let name = tables.name(0x10).unwrap();
        assert_eq!(name.prefix(), Some("Abc-"));
        assert_eq!(name.suffix(), "");
        assert_eq!(name, "Abc-");
        assert_eq!(tables.name(0x11).unwrap(), "Abc-Def");
        assert!(tables.name(0x12).is_none());
    }

    #[test]
    fn bad_version() {
        let mut data = SIMPLE.to_vec();
        data[1] = 2;
        assert_eq!(
            NameTables::new(&data).unwrap_err(),
            ReadError::InvalidFormat(2)
        );
    }

    #[test]
    fn truncated() {
        assert_eq!(
            NameTables::new(&SIMPLE[..32]).unwrap_err(),
            ReadError::OutOfBounds
        );
        // string data is read lazily
        let tables = NameTables::new(&SIMPLE[..62]).unwrap();
        assert!(tables.name(0x1F600).is_none());
    }

    #[test]
    fn block_names() {
        let tables = NameTables::new(test_data::WITH_BLOCKS).unwrap();
        assert_eq!(tables.block_records().len(), 2);
        assert_eq!(tables.block(0), Ok("Basic Latin"));
        assert_eq!(tables.block(2), Err(ReadError::OutOfBounds));
        assert_eq!(tables.block_name(0), Some("Basic Latin"));
        assert_eq!(tables.block_name(0x41), Some("Basic Latin"));
        assert_eq!(tables.block_name(0x7F), Some("Basic Latin"));
        assert_eq!(tables.block_name(0x80), None);
        assert_eq!(tables.block_name(0x1F5FF), None);
        assert_eq!(tables.block_name(0x1F600), Some("Emoticons"));
        assert_eq!(tables.block_name(0x1F64F), Some("Emoticons"));
        assert_eq!(tables.block_name(0x1F650), None);
        assert_eq!(tables.block_name(u32::MAX), None);
        // names are unaffected by the blocks
        assert_eq!(tables.name(0x1F600).unwrap(), "Grinning Face");
        assert_eq!(tables.name(0x42).unwrap(), "Latin Capital Letter B");
    }

    #[test]
    fn display() {
        let name = Name::new(Some("Box Drawings "), "Light Horizontal");
        assert_eq!(format!("{name}"), "Box Drawings Light Horizontal");
        assert_eq!(name.chars().count(), name.len());
        assert_ne!(name, "Box Drawings Heavy Horizontal");
    }
}
