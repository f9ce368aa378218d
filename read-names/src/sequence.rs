//! Mapping keys to name table rows through the sequence (jump) table.
//!
//! The sequence table stores one record per maximal run of consecutive keys.
//! Each record holds the first key of the run and the row of the name table
//! at which that run begins. The length of a run is implied by the row at
//! which the next run begins (or by the total row count, for the last run),
//! so a key that is past the end of its run falls in a gap and is unassigned.

use std::ops::Range;

/// A record in a sequence table.
///
/// This is implemented both for the in-memory records produced when building
/// tables, and for the zero-copy records read from serialized data, so that
/// both share a single lookup implementation.
pub trait SequenceRun {
    /// The first key covered by this run.
    fn start_key(&self) -> u32;
    /// The name table row corresponding to [`start_key`](Self::start_key).
    fn first_row(&self) -> u32;
}

/// Find the name table row for `key`.
///
/// `runs` must be sorted by key, as produced by the builder, and `row_count`
/// is the total number of rows in the name table.
///
/// Returns `None` if `key` is before the first run, or falls in a gap
/// between runs.
pub fn find_row<T: SequenceRun>(runs: &[T], row_count: u32, key: u32) -> Option<u32> {
    let ix = runs
        .partition_point(|run| run.start_key() <= key)
        .checked_sub(1)?;
    let rows = run_rows(runs, row_count, ix)?;
    let offset = key - runs[ix].start_key();
    let row = rows.start.checked_add(offset)?;
    rows.contains(&row).then_some(row)
}

/// The range of name table rows covered by the run at `index`.
pub fn run_rows<T: SequenceRun>(runs: &[T], row_count: u32, index: usize) -> Option<Range<u32>> {
    let start = runs.get(index)?.first_row();
    let end = runs
        .get(index + 1)
        .map(SequenceRun::first_row)
        .unwrap_or(row_count);
    Some(start..end.max(start))
}

/// The range of keys covered by the run at `index`.
pub fn run_keys<T: SequenceRun>(runs: &[T], row_count: u32, index: usize) -> Option<Range<u32>> {
    let rows = run_rows(runs, row_count, index)?;
    let start = runs[index].start_key();
    Some(start..start.saturating_add(rows.end - rows.start))
}

/// Iterate over every `(key, row)` pair covered by a sequence table.
pub fn iter_rows<T: SequenceRun>(
    runs: &[T],
    row_count: u32,
) -> impl Iterator<Item = (u32, u32)> + '_ {
    (0..runs.len()).flat_map(move |ix| {
        let keys = run_keys(runs, row_count, ix).unwrap_or_default();
        let first = runs[ix].first_row();
        keys.enumerate()
            .map(move |(offset, key)| (key, first + offset as u32))
    })
}

impl SequenceRun for (u32, u32) {
    fn start_key(&self) -> u32 {
        self.0
    }

    fn first_row(&self) -> u32 {
        self.1
    }
}
