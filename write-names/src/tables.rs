//! The compressed name tables

use read_names::{sequence, Name};

use crate::{
    blocks::{find_block, BlockRange},
    builder::NameTableBuilder,
    error::Error,
    options::BuildOptions,
    pool::{NameRecord, PrefixPool},
    sequence::SequenceRecord,
};

/// The three tables that make up a compressed name mapping.
///
/// - `prefixes`: the shared prefixes, sorted.
/// - `names`: one row per key, in key order.
/// - `sequences`: one record per run of consecutive keys.
/// - `blocks`: named key ranges, sorted and non-overlapping. These are
///   optional and independent of the names.
///
/// A key is mapped to its row by finding the run that contains it; keys
/// outside every run are unassigned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameTables {
    pub prefixes: PrefixPool,
    pub names: Vec<NameRecord>,
    pub sequences: Vec<SequenceRecord>,
    pub blocks: Vec<BlockRange>,
}

/// String storage required with and without prefix sharing.
///
/// Sizes count one terminator byte per string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Bytes needed to store every name in full.
    pub raw_bytes: usize,
    /// Bytes needed to store the prefix pool and every suffix.
    pub encoded_bytes: usize,
}

impl NameTables {
    /// Build tables from `(key, name)` pairs, using the default options.
    ///
    /// The pairs must be sorted by key, without duplicates.
    pub fn from_entries<S: Into<String>>(
        entries: impl IntoIterator<Item = (u32, S)>,
    ) -> Result<NameTables, Error> {
        Self::from_entries_with_options(entries, BuildOptions::default())
    }

    /// Build tables from `(key, name)` pairs, using the provided options.
    pub fn from_entries_with_options<S: Into<String>>(
        entries: impl IntoIterator<Item = (u32, S)>,
        options: BuildOptions,
    ) -> Result<NameTables, Error> {
        NameTableBuilder::new(options)
            .with_names(entries)
            .map(NameTableBuilder::build)
    }

    /// The number of keys with a name.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The name table row for `key`, or `None` if `key` is unassigned.
    pub fn row_for_key(&self, key: u32) -> Option<u32> {
        sequence::find_row(&self.sequences, self.names.len() as u32, key)
    }

    /// The parts of the name at `row`.
    pub fn row(&self, row: u32) -> Option<Name<'_>> {
        let record = self.names.get(row as usize)?;
        let prefix = match record.prefix_index {
            Some(index) => Some(self.prefixes.get(index)?),
            None => None,
        };
        Some(Name::new(prefix, &record.suffix))
    }

    /// The parts of the name for `key`.
    pub fn name_parts(&self, key: u32) -> Option<Name<'_>> {
        self.row_for_key(key).and_then(|row| self.row(row))
    }

    /// The full name for `key`, or `None` if `key` is unassigned.
    pub fn name(&self, key: u32) -> Option<String> {
        self.name_parts(key).map(|name| name.to_string())
    }

    /// The block containing `key`, if any.
    pub fn block(&self, key: u32) -> Option<&BlockRange> {
        find_block(&self.blocks, key)
    }

    /// The name of the block containing `key`, if any.
    pub fn block_name(&self, key: u32) -> Option<&str> {
        self.block(key).map(|block| block.name.as_str())
    }

    /// Returns an iterator over every `(key, name)` pair, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Name<'_>)> + '_ {
        sequence::iter_rows(&self.sequences, self.names.len() as u32)
            .filter_map(|(key, row)| Some((key, self.row(row)?)))
    }

    /// The length in bytes of the longest name.
    ///
    /// A buffer of this size can hold any name joined from its parts.
    pub fn max_name_len(&self) -> usize {
        (0..self.names.len() as u32)
            .filter_map(|row| self.row(row))
            .map(|name| name.len())
            .max()
            .unwrap_or_default()
    }

    /// Compute how much string storage is saved by sharing prefixes.
    pub fn stats(&self) -> TableStats {
        let raw_bytes = (0..self.names.len() as u32)
            .filter_map(|row| self.row(row))
            .map(|name| name.len() + 1)
            .sum();
        let encoded_bytes = self.prefixes.iter().map(|p| p.len() + 1).sum::<usize>()
            + self
                .names
                .iter()
                .map(|rec| rec.suffix.len() + 1)
                .sum::<usize>();
        TableStats {
            raw_bytes,
            encoded_bytes,
        }
    }
}
