//! The prefix pool and name table rows

use std::collections::BTreeSet;

/// The deduplicated, sorted set of prefixes shared between names.
///
/// Each prefix is identified by its index in the pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixPool(Vec<String>);

impl PrefixPool {
    /// Create a pool from prefixes in any order, with any repetition.
    pub fn new<'a>(prefixes: impl IntoIterator<Item = &'a str>) -> Self {
        let unique = prefixes.into_iter().collect::<BTreeSet<_>>();
        PrefixPool(unique.into_iter().map(str::to_owned).collect())
    }

    /// The index of `prefix` in the pool.
    pub fn index_of(&self, prefix: &str) -> Option<u32> {
        self.0
            .binary_search_by(|entry| entry.as_str().cmp(prefix))
            .ok()
            .map(|index| index as u32)
    }

    pub fn get(&self, index: u32) -> Option<&str> {
        self.0.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

/// One row of the name table.
///
/// If the name has a prefix, the full name is the prefix followed by the
/// suffix. A name that is identical to its prefix has an empty suffix; this
/// is a valid row and is serialized with a dedicated marker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameRecord {
    /// Index into the [`PrefixPool`], if this name has a prefix.
    pub prefix_index: Option<u32>,
    /// The rest of the name, after the prefix.
    pub suffix: String,
}

impl NameRecord {
    pub fn new(prefix_index: Option<u32>, suffix: impl Into<String>) -> Self {
        NameRecord {
            prefix_index,
            suffix: suffix.into(),
        }
    }

    /// Split `name` into a row, stripping `prefix` if it is in the pool.
    pub(crate) fn split(pool: &PrefixPool, name: &str, prefix: Option<&str>) -> Self {
        prefix
            .and_then(|prefix| Some((pool.index_of(prefix)?, name.strip_prefix(prefix)?)))
            .map(|(index, suffix)| NameRecord::new(Some(index), suffix))
            .unwrap_or_else(|| NameRecord::new(None, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_and_deduplicated() {
        let pool = PrefixPool::new([
            "Latin Small Letter ",
            "Box Drawings ",
            "Latin Capital Letter ",
            "Box Drawings ",
        ]);
        assert_eq!(
            pool.iter().collect::<Vec<_>>(),
            ["Box Drawings ", "Latin Capital Letter ", "Latin Small Letter "]
        );
        assert_eq!(pool.index_of("Latin Capital Letter "), Some(1));
        assert_eq!(pool.index_of("Latin "), None);
        assert_eq!(pool.get(2), Some("Latin Small Letter "));
        assert_eq!(pool.get(3), None);
    }

    #[test]
    fn split_names() {
        let pool = PrefixPool::new(["Latin Capital Letter ", "Abc-"]);
        assert_eq!(
            NameRecord::split(&pool, "Latin Capital Letter A", Some("Latin Capital Letter ")),
            NameRecord::new(Some(1), "A")
        );
        assert_eq!(
            NameRecord::split(&pool, "Grinning Face", None),
            NameRecord::new(None, "Grinning Face")
        );
        // a name identical to its prefix keeps an explicit empty suffix
        assert_eq!(
            NameRecord::split(&pool, "Abc-", Some("Abc-")),
            NameRecord::new(Some(0), "")
        );
    }
}
