//! Building name tables
//!
//! Names are added one at a time, in ascending key order. Each new name is
//! compared against a window of the most recently added names; the best
//! shared prefix found is assigned to the new name *and* to every name in
//! the window that shares it, replacing whatever prefix those names had
//! before. A later name can therefore move an earlier one into a larger
//! group, but only while the earlier name is still inside the window.

use std::collections::VecDeque;

use crate::{
    blocks::{short_block_name, BlockRange},
    error::Error,
    options::BuildOptions,
    pool::{NameRecord, PrefixPool},
    prefix::{common_prefix, PrefixCandidates},
    sequence::build_sequence_table,
    tables::NameTables,
};

/// The working state of one entry while the tables are being built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderRecord {
    pub key: u32,
    pub name: String,
    /// The prefix currently assigned to this entry.
    ///
    /// This may be replaced when later entries are added.
    pub prefix: Option<String>,
}

/// A builder for [`NameTables`].
///
/// Names must be supplied with any redundant context (such as a repeated
/// block name) already removed; the builder only shares prefixes between
/// names, it does not shorten them.
#[derive(Clone, Debug)]
pub struct NameTableBuilder {
    options: BuildOptions,
    // every entry, in insertion order
    records: Vec<BuilderRecord>,
    window: LookbackWindow,
    blocks: Vec<BlockRange>,
}

/// A bounded ring of indices of the most recently added records.
///
/// Only records in this window are compared with, and relabeled by, a
/// newly added record.
#[derive(Clone, Debug)]
struct LookbackWindow {
    capacity: usize,
    indices: VecDeque<usize>,
}

impl LookbackWindow {
    fn new(capacity: usize) -> Self {
        LookbackWindow {
            capacity,
            indices: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, index: usize) {
        if self.indices.len() == self.capacity {
            self.indices.pop_front();
        }
        self.indices.push_back(index);
    }

    /// Iterate from the most to the least recently added index.
    fn iter_recent(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().rev().copied()
    }

    fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

impl NameTableBuilder {
    pub fn new(options: BuildOptions) -> Self {
        NameTableBuilder {
            options,
            records: Vec::new(),
            window: LookbackWindow::new(options.window_size()),
            blocks: Vec::new(),
        }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// The number of names added so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The entries added so far, with their current prefix assignments.
    pub fn records(&self) -> &[BuilderRecord] {
        &self.records
    }

    /// Add a name.
    ///
    /// Keys must be strictly ascending; a key that is not greater than the
    /// previous key is rejected and the builder is left unchanged.
    pub fn add(&mut self, key: u32, name: impl Into<String>) -> Result<(), Error> {
        if let Some(previous) = self.records.last().map(|rec| rec.key) {
            if key <= previous {
                return Err(Error::KeyOutOfOrder { previous, key });
            }
        }

        let name = name.into();
        let prefix = match self.best_prefix(&name) {
            Some((prefix, members)) => {
                for member in members {
                    self.relabel(member, &prefix);
                }
                Some(prefix)
            }
            None => None,
        };

        let index = self.records.len();
        self.records.push(BuilderRecord { key, name, prefix });
        self.window.push(index);
        Ok(())
    }

    /// Builder-style method to add a sequence of names.
    pub fn with_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = (u32, S)>,
    ) -> Result<Self, Error> {
        for (key, name) in names {
            self.add(key, name)?;
        }
        Ok(self)
    }

    /// Add a named block covering the keys `start..=end`.
    ///
    /// Blocks must be added in ascending order and must not overlap. They
    /// are independent of the names: a block may contain no names, and a
    /// name need not be in any block. The name is shortened with
    /// [`short_block_name`].
    pub fn add_block(
        &mut self,
        start: u32,
        end: u32,
        name: impl AsRef<str>,
    ) -> Result<(), Error> {
        if start > end {
            return Err(Error::InvalidBlock { start, end });
        }
        if let Some(previous_end) = self.blocks.last().map(|block| block.end) {
            if start <= previous_end {
                return Err(Error::BlockOutOfOrder {
                    previous_end,
                    start,
                });
            }
        }
        self.blocks
            .push(BlockRange::new(start, end, short_block_name(name.as_ref())));
        Ok(())
    }

    /// Builder-style method to add a sequence of blocks.
    pub fn with_blocks<S: AsRef<str>>(
        mut self,
        blocks: impl IntoIterator<Item = (u32, u32, S)>,
    ) -> Result<Self, Error> {
        for (start, end, name) in blocks {
            self.add_block(start, end, name)?;
        }
        Ok(self)
    }

    /// The blocks added so far.
    pub fn blocks(&self) -> &[BlockRange] {
        &self.blocks
    }

    /// Find the best prefix shared between `name` and the window, along with
    /// the records that share it.
    fn best_prefix(&self, name: &str) -> Option<(String, Vec<usize>)> {
        let min_len = self.options.min_prefix_len();
        let mut candidates = PrefixCandidates::default();
        for index in self.window.iter_recent() {
            if let Some(prefix) = common_prefix(name, &self.records[index].name, min_len) {
                candidates.insert(prefix, index);
            }
        }
        let best = candidates.best()?;
        log::trace!(
            "{} candidates for '{name}', best '{}' (score {})",
            candidates.len(),
            best.prefix,
            best.score()
        );
        Some((best.prefix.to_owned(), best.members.to_vec()))
    }

    fn relabel(&mut self, index: usize, prefix: &str) {
        debug_assert!(self.window.contains(index), "relabel outside window");
        let record = &mut self.records[index];
        if record.prefix.as_deref() == Some(prefix) {
            return;
        }
        if let Some(current) = &record.prefix {
            log::trace!(
                "relabel 0x{:04X} from '{current}' to '{prefix}'",
                record.key
            );
        }
        record.prefix = Some(prefix.to_owned());
    }

    /// Build the final tables.
    pub fn build(self) -> NameTables {
        let prefixes = PrefixPool::new(self.records.iter().filter_map(|rec| rec.prefix.as_deref()));
        let names = self
            .records
            .iter()
            .map(|rec| NameRecord::split(&prefixes, &rec.name, rec.prefix.as_deref()))
            .collect::<Vec<_>>();
        let sequences = build_sequence_table(self.records.iter().map(|rec| rec.key));

        let tables = NameTables {
            prefixes,
            names,
            sequences,
            blocks: self.blocks,
        };
        let stats = tables.stats();
        log::debug!(
            "built name tables: {} names, {} prefixes, {} runs, {} blocks, {}B of strings ({}B uncompressed)",
            tables.names.len(),
            tables.prefixes.len(),
            tables.sequences.len(),
            tables.blocks.len(),
            stats.encoded_bytes,
            stats.raw_bytes,
        );
        tables
    }
}

impl Default for NameTableBuilder {
    fn default() -> Self {
        NameTableBuilder::new(BuildOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn prefixes(builder: &NameTableBuilder) -> Vec<Option<&str>> {
        builder
            .records()
            .iter()
            .map(|rec| rec.prefix.as_deref())
            .collect()
    }

    #[test]
    fn pair_shares_prefix() {
        let builder = NameTableBuilder::default()
            .with_names([
                (0x41, "Latin Capital Letter A"),
                (0x42, "Latin Capital Letter B"),
                (0x1F600, "Grinning Face"),
            ])
            .unwrap();
        assert_eq!(
            prefixes(&builder),
            [
                Some("Latin Capital Letter "),
                Some("Latin Capital Letter "),
                None
            ]
        );
    }

    #[test]
    fn retroactive_override() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = NameTableBuilder::default();
        builder.add(1, "Box Drawings Light Horizontal").unwrap();
        builder.add(2, "Box Drawings Light Vertical").unwrap();
        // entry 1 is first paired with entry 2 alone
        assert_eq!(
            prefixes(&builder),
            [Some("Box Drawings Light "), Some("Box Drawings Light ")]
        );
        // 'Box Drawings ' is shared with both earlier entries, and replaces
        // their longer pairwise prefix
        builder.add(3, "Box Drawings Heavy Horizontal").unwrap();
        assert_eq!(
            prefixes(&builder),
            [
                Some("Box Drawings "),
                Some("Box Drawings "),
                Some("Box Drawings ")
            ]
        );
    }

    #[test]
    fn prefix_stops_at_last_shared_space() {
        let mut builder = NameTableBuilder::default();
        builder.add(1, "Latin Capital Letter A").unwrap();
        builder.add(2, "Latin Capital Letter B").unwrap();
        builder.add(3, "Grinning Face").unwrap();
        builder.add(4, "Grinning Face With Smiling Eyes").unwrap();
        // "Grinning Face" has no trailing space, so only "Grinning " is shared
        assert_eq!(
            prefixes(&builder),
            [
                Some("Latin Capital Letter "),
                Some("Latin Capital Letter "),
                Some("Grinning "),
                Some("Grinning ")
            ]
        );
        let tables = builder.build();
        assert_eq!(tables.names[2], NameRecord::new(Some(0), "Face"));
        assert_eq!(tables.name(3).as_deref(), Some("Grinning Face"));
        assert_eq!(
            tables.name(4).as_deref(),
            Some("Grinning Face With Smiling Eyes")
        );
    }

    #[test]
    fn window_is_bounded() {
        let options = BuildOptions::default().with_window_size(2).unwrap();
        let mut builder = NameTableBuilder::new(options);
        builder.add(1, "Digit Zero").unwrap();
        builder.add(2, "Comma").unwrap();
        builder.add(3, "Full Stop").unwrap();
        // 'Digit Zero' has left the window
        builder.add(4, "Digit One").unwrap();
        assert_eq!(prefixes(&builder), [None, None, None, None]);

        let mut builder = NameTableBuilder::default();
        builder.add(1, "Digit Zero").unwrap();
        builder.add(2, "Comma").unwrap();
        builder.add(3, "Full Stop").unwrap();
        builder.add(4, "Digit One").unwrap();
        assert_eq!(
            prefixes(&builder),
            [Some("Digit "), None, None, Some("Digit ")]
        );
    }

    #[test]
    fn relabel_is_limited_to_window() {
        let _ = env_logger::builder().is_test(true).try_init();
        let options = BuildOptions::default().with_window_size(2).unwrap();
        let mut builder = NameTableBuilder::new(options);
        builder.add(1, "Up Down Arrow").unwrap();
        builder.add(2, "Up Down Arrow With Base").unwrap();
        builder.add(3, "Tack").unwrap();
        builder.add(4, "Up Arrow").unwrap();
        // the first entry left the window before its partner was relabeled
        assert_eq!(
            prefixes(&builder),
            [Some("Up Down "), Some("Up "), None, Some("Up ")]
        );
        let tables = builder.build();
        assert_eq!(
            tables.prefixes.iter().collect::<Vec<_>>(),
            ["Up ", "Up Down "]
        );
        assert_eq!(tables.names[0], NameRecord::new(Some(1), "Arrow"));
        assert_eq!(tables.names[1], NameRecord::new(Some(0), "Down Arrow With Base"));
    }

    #[test]
    fn min_prefix_len_option() {
        let options = BuildOptions::default().with_min_prefix_len(8).unwrap();
        let builder = NameTableBuilder::new(options)
            .with_names([(1, "Up Arrow"), (2, "Up Tack")])
            .unwrap();
        assert_eq!(prefixes(&builder), [None, None]);
    }

    #[test]
    fn keys_must_ascend() {
        let mut builder = NameTableBuilder::default();
        builder.add(5, "Five").unwrap();
        assert!(matches!(
            builder.add(5, "Five Again"),
            Err(Error::KeyOutOfOrder {
                previous: 5,
                key: 5
            })
        ));
        assert!(matches!(
            builder.add(4, "Four"),
            Err(Error::KeyOutOfOrder {
                previous: 5,
                key: 4
            })
        ));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn blocks_are_shortened() {
        let builder = NameTableBuilder::default()
            .with_blocks([
                (0x2190, 0x21FF, "Arrows"),
                (0x2B00, 0x2BFF, "Miscellaneous Symbols and Arrows"),
            ])
            .unwrap();
        assert_eq!(
            builder.blocks(),
            [
                BlockRange::new(0x2190, 0x21FF, "Arrows"),
                BlockRange::new(0x2B00, 0x2BFF, "Misc. Symbols and Arrows"),
            ]
        );
        let tables = builder.with_names([(0x2190, "Leftwards Arrow")]).unwrap().build();
        assert_eq!(tables.blocks.len(), 2);
        assert_eq!(tables.block_name(0x2B50), Some("Misc. Symbols and Arrows"));
    }

    #[test]
    fn blocks_must_ascend() {
        let mut builder = NameTableBuilder::default();
        assert!(matches!(
            builder.add_block(0x80, 0x7F, "Backwards"),
            Err(Error::InvalidBlock {
                start: 0x80,
                end: 0x7F
            })
        ));
        builder.add_block(0x00, 0x7F, "Basic Latin").unwrap();
        assert!(matches!(
            builder.add_block(0x7F, 0xFF, "Overlapping"),
            Err(Error::BlockOutOfOrder {
                previous_end: 0x7F,
                start: 0x7F
            })
        ));
        // a single key block
        builder.add_block(0x80, 0x80, "One").unwrap();
        assert_eq!(builder.blocks().len(), 2);
    }

    #[test]
    fn ring_buffer() {
        let mut window = LookbackWindow::new(3);
        for i in 0..5 {
            window.push(i);
        }
        assert_eq!(window.iter_recent().collect::<Vec<_>>(), [4, 3, 2]);
        assert!(!window.contains(1));
    }
}
