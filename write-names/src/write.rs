//! Serializing name tables

use std::collections::HashMap;

use read_names::tables::{EMPTY_SUFFIX, NO_PREFIX, VERSION_1};

use crate::{
    error::Error,
    sequence::SequenceRecord,
    tables::NameTables,
    validate::{Validate, MAX_STRING_LEN},
};

/// A type that can be written out as big-endian bytes.
pub trait TableWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A growable buffer of serialized table data.
#[derive(Clone, Debug, Default)]
pub struct TableWriter {
    data: Vec<u8>,
}

/// Attempt to serialize a set of name tables.
///
/// If the tables are malformed, this will return an [`Error::ValidationFailed`],
/// otherwise it will return the bytes encoding the tables. The output can be
/// loaded with [`read_names::NameTables::new`].
pub fn dump_tables(tables: &NameTables) -> Result<Vec<u8>, Error> {
    tables.validate()?;
    let mut writer = TableWriter::default();
    tables.write_into(&mut writer);
    Ok(writer.into_data())
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl TableWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(u16);
write_be_bytes!(u32);

impl<T: TableWrite> TableWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl TableWrite for SequenceRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.key.write_into(writer);
        self.name_index.write_into(writer);
    }
}

/// Length-prefixed string storage, with each distinct string stored once.
///
/// Offsets are relative to the start of the pool.
#[derive(Clone, Debug, Default)]
pub struct StringPool {
    offsets: HashMap<String, u32>,
    data: Vec<u8>,
}

impl StringPool {
    /// Add `string` to the pool if it is not already present, returning its offset.
    ///
    /// Strings must be shorter than 256 bytes; this is checked during
    /// validation.
    pub fn intern(&mut self, string: &str) -> u32 {
        if let Some(offset) = self.offsets.get(string) {
            return *offset;
        }
        debug_assert!(string.len() <= MAX_STRING_LEN);
        let offset = self.data.len() as u32;
        self.data.push(string.len() as u8);
        self.data.extend_from_slice(string.as_bytes());
        self.offsets.insert(string.to_owned(), offset);
        offset
    }

    /// The number of distinct strings in the pool.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl TableWrite for NameTables {
    fn write_into(&self, writer: &mut TableWriter) {
        let mut strings = StringPool::default();
        let prefix_offsets = self
            .prefixes
            .iter()
            .map(|prefix| strings.intern(prefix))
            .collect::<Vec<_>>();
        let suffix_offsets = self
            .names
            .iter()
            .map(|record| match record.suffix.as_str() {
                "" => EMPTY_SUFFIX,
                suffix => strings.intern(suffix),
            })
            .collect::<Vec<_>>();
        let block_offsets = self
            .blocks
            .iter()
            .map(|block| strings.intern(&block.name))
            .collect::<Vec<_>>();
        log::trace!(
            "{} distinct strings in {} bytes",
            strings.len(),
            strings.as_bytes().len()
        );

        VERSION_1.write_into(writer);
        (self.max_name_len() as u16).write_into(writer);
        (self.sequences.len() as u32).write_into(writer);
        (self.names.len() as u32).write_into(writer);
        (self.prefixes.len() as u16).write_into(writer);
        (self.blocks.len() as u16).write_into(writer);
        self.sequences.write_into(writer);
        prefix_offsets.write_into(writer);
        for (record, suffix_offset) in self.names.iter().zip(suffix_offsets) {
            record
                .prefix_index
                .map(|index| index as u16)
                .unwrap_or(NO_PREFIX)
                .write_into(writer);
            suffix_offset.write_into(writer);
        }
        for (block, name_offset) in self.blocks.iter().zip(block_offsets) {
            block.start.write_into(writer);
            block.end.write_into(writer);
            name_offset.write_into(writer);
        }
        writer.write_slice(strings.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use name_test_data::tables as test_data;
    use pretty_assertions::assert_eq;
    use read_names::tables::HEADER_LEN;

    use super::*;
    use crate::NameTableBuilder;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn simple() {
        init();
        let tables = NameTables::from_entries(test_data::SIMPLE_ENTRIES.iter().copied()).unwrap();
        let bytes = dump_tables(&tables).unwrap();
        assert_eq!(bytes, test_data::SIMPLE);
    }

    #[test]
    fn empty_suffix() {
        init();
        let tables =
            NameTables::from_entries(test_data::EMPTY_SUFFIX_ENTRIES.iter().copied()).unwrap();
        let bytes = dump_tables(&tables).unwrap();
        assert_eq!(bytes, test_data::EMPTY_SUFFIX);
    }

    #[test]
    fn with_blocks() {
        let tables = NameTableBuilder::default()
            .with_names(test_data::SIMPLE_ENTRIES.iter().copied())
            .and_then(|builder| builder.with_blocks(test_data::WITH_BLOCKS_RANGES.iter().copied()))
            .unwrap()
            .build();
        let bytes = dump_tables(&tables).unwrap();
        assert_eq!(bytes, test_data::WITH_BLOCKS);
    }

    #[test]
    fn block_names_share_storage() {
        let tables = NameTableBuilder::default()
            .with_names([(0x2190, "Arrows"), (0x2191, "Up Arrow")])
            .and_then(|builder| builder.with_blocks([(0x2190, 0x21FF, "Arrows")]))
            .unwrap()
            .build();
        let bytes = dump_tables(&tables).unwrap();
        let loaded = read_names::NameTables::new(&bytes).unwrap();
        let block = loaded.block_records()[0];
        assert_eq!(
            loaded.name_records()[0].suffix_offset(),
            Some(block.name_offset())
        );
        assert_eq!(loaded.block_name(0x2191), Some("Arrows"));
    }

    #[test]
    fn empty_tables() {
        let tables = NameTables::default();
        let bytes = dump_tables(&tables).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(bytes, [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn strings_are_deduplicated() {
        let mut pool = StringPool::default();
        assert_eq!(pool.intern("Face"), 0);
        assert_eq!(pool.intern("Arrow"), 5);
        assert_eq!(pool.intern("Face"), 0);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.as_bytes(), b"\x04Face\x05Arrow");
    }

    #[test]
    fn repeated_suffixes_share_storage() {
        let tables = NameTables::from_entries([
            (0x10, "Left Arrow"),
            (0x11, "Right Arrow"),
            (0x20, "Left Arrow"),
        ])
        .unwrap();
        let bytes = dump_tables(&tables).unwrap();
        let loaded = read_names::NameTables::new(&bytes).unwrap();
        let offsets = loaded
            .name_records()
            .iter()
            .map(|rec| rec.suffix_offset())
            .collect::<Vec<_>>();
        assert_eq!(offsets[0], offsets[2]);
        assert_ne!(offsets[0], offsets[1]);
    }

    #[test]
    fn invalid_tables_are_not_written() {
        let tables = NameTables::from_entries([(1, "y".repeat(256))]).unwrap();
        let err = dump_tables(&tables).unwrap_err();
        assert!(matches!(err, Error::ValidationFailed(_)));
    }
}
