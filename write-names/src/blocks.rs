//! Named ranges of keys

/// A named, inclusive range of keys, such as a Unicode block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockRange {
    /// The first key in the block.
    pub start: u32,
    /// The last key in the block.
    pub end: u32,
    pub name: String,
}

impl BlockRange {
    pub fn new(start: u32, end: u32, name: impl Into<String>) -> Self {
        BlockRange {
            start,
            end,
            name: name.into(),
        }
    }

    /// Returns `true` if `key` is within this block.
    pub fn contains(&self, key: u32) -> bool {
        (self.start..=self.end).contains(&key)
    }
}

/// Shorten a block name for display on small screens.
///
/// "Miscellaneous" is abbreviated to "Misc."; other names are unchanged.
pub fn short_block_name(name: &str) -> String {
    name.replace("Miscellaneous", "Misc.")
}

/// Find the block containing `key` in a sorted, non-overlapping list.
pub(crate) fn find_block(blocks: &[BlockRange], key: u32) -> Option<&BlockRange> {
    let index = blocks
        .partition_point(|block| block.start <= key)
        .checked_sub(1)?;
    blocks.get(index).filter(|block| block.contains(key))
}
