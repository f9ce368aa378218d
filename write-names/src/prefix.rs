//! Finding shared prefixes between names
//!
//! A prefix may only be shared if it ends on a word boundary: it must end
//! immediately after a space or, if the shared text contains no space, after
//! a hyphen. This keeps prefixes to whole words, so that "Latin Small Letter"
//! and "Latin Sharp" share "Latin " rather than "Latin S".

use indexmap::IndexMap;

/// Find the longest word-aligned prefix of `a` that is shared with `b`.
///
/// The shared text is truncated after its last space, or after its last
/// hyphen if it contains no space; the boundary character is part of the
/// prefix. Returns `None` if either string is empty, if the shared text
/// has no boundary, or if the prefix is shorter than `min_len` characters.
///
/// The returned prefix borrows from `a`.
pub fn common_prefix<'a>(a: &'a str, b: &str, min_len: usize) -> Option<&'a str> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    // length in bytes of the shared text; equal characters have equal
    // encodings, so this is also a char boundary in `b`
    let shared = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((pos, _), _)| pos)
        .unwrap_or_else(|| a.len().min(b.len()));

    let shared = &a[..shared];
    let boundary = shared.rfind(' ').or_else(|| shared.rfind('-'))?;
    // both boundary characters are a single byte
    let prefix = &a[..boundary + 1];
    (prefix.chars().count() >= min_len).then_some(prefix)
}

/// The candidate prefixes for one entry, grouped by prefix.
///
/// Each group records the entries (by arena index) in the lookback window
/// that share that prefix with the current entry. Groups are kept in the
/// order they were first seen.
#[derive(Clone, Debug, Default)]
pub struct PrefixCandidates<'a> {
    groups: IndexMap<&'a str, Vec<usize>>,
}

/// A prefix and the window entries that share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<'a, 'b> {
    pub prefix: &'a str,
    pub members: &'b [usize],
}

impl<'a> PrefixCandidates<'a> {
    /// Record that the entry at `member` shares `prefix` with the current entry.
    pub fn insert(&mut self, prefix: &'a str, member: usize) {
        self.groups.entry(prefix).or_default().push(member);
    }

    /// The number of distinct candidate prefixes.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Candidate<'a, '_>> + '_ {
        self.groups.iter().map(|(prefix, members)| Candidate {
            prefix: *prefix,
            members: members.as_slice(),
        })
    }

    /// The winning candidate, if any.
    ///
    /// Candidates are ordered by [`Candidate::score`], then by prefix; the
    /// greatest wins. Prefixes are unique, so this is a total order and the
    /// result does not depend on the order in which candidates were found.
    pub fn best(&self) -> Option<Candidate<'a, '_>> {
        self.iter().max_by(|a, b| a.cmp_rank(b))
    }
}

impl Candidate<'_, '_> {
    /// The score of this candidate: `prefix length * members²`.
    ///
    /// The square weights reuse of a prefix by many entries over the raw
    /// length of the prefix. Length is measured in characters.
    pub fn score(&self) -> usize {
        let count = self.members.len();
        self.prefix.chars().count() * count * count
    }

    fn cmp_rank(&self, other: &Self) -> std::cmp::Ordering {
        self.score()
            .cmp(&other.score())
            .then_with(|| self.prefix.cmp(other.prefix))
    }
}
