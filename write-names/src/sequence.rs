//! Building the sequence (jump) table

use read_names::sequence::SequenceRun;

/// The start of a run of consecutive keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceRecord {
    /// The first key in the run.
    pub key: u32,
    /// The name table row of the first key in the run.
    pub name_index: u32,
}

impl SequenceRecord {
    pub fn new(key: u32, name_index: u32) -> Self {
        SequenceRecord { key, name_index }
    }
}

impl SequenceRun for SequenceRecord {
    fn start_key(&self) -> u32 {
        self.key
    }

    fn first_row(&self) -> u32 {
        self.name_index
    }
}

/// Build the sequence table for a list of keys.
///
/// The keys are expected to be in ascending order, one per name table row;
/// this is not checked here. A record is emitted for the first key, and for
/// every key that does not directly follow the previous one, so a fully
/// contiguous list of keys produces a single record.
pub fn build_sequence_table(keys: impl IntoIterator<Item = u32>) -> Vec<SequenceRecord> {
    let mut records = Vec::new();
    let mut previous: Option<u32> = None;
    for (row, key) in keys.into_iter().enumerate() {
        let next_in_run = previous.and_then(|prev| prev.checked_add(1));
        if next_in_run != Some(key) {
            // Start a new run
            records.push(SequenceRecord::new(key, row as u32));
        }
        previous = Some(key);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_keys_make_one_record() {
        let records = build_sequence_table(0..1000);
        assert_eq!(records, [SequenceRecord::new(0, 0)]);
    }

    #[test]
    fn one_record_per_run() {
        // runs 10..=20, 30..=90 and 153..=480
        let keys = (10..=20).chain(30..=90).chain(153..=480);
        let records = build_sequence_table(keys);
        assert_eq!(
            records,
            [
                SequenceRecord::new(10, 0),
                SequenceRecord::new(30, 11),
                SequenceRecord::new(153, 72),
            ]
        );
    }

    #[test]
    fn isolated_keys() {
        let records = build_sequence_table([0x41, 0x43, 0x45]);
        assert_eq!(
            records,
            [
                SequenceRecord::new(0x41, 0),
                SequenceRecord::new(0x43, 1),
                SequenceRecord::new(0x45, 2),
            ]
        );
    }

    #[test]
    fn max_key_does_not_overflow() {
        let records = build_sequence_table([u32::MAX - 1, u32::MAX]);
        assert_eq!(records, [SequenceRecord::new(u32::MAX - 1, 0)]);
        let records = build_sequence_table([0, u32::MAX]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn no_keys() {
        assert!(build_sequence_table(std::iter::empty()).is_empty());
    }

    #[test]
    fn strictly_increasing() {
        let keys = [1, 2, 3, 7, 8, 100, 0x1F600, 0x1F601, 0x1F603];
        let records = build_sequence_table(keys);
        assert!(records
            .windows(2)
            .all(|pair| pair[0].key < pair[1].key && pair[0].name_index < pair[1].name_index));
        // no record for keys inside a run
        for key in [2, 3, 8, 0x1F601] {
            assert!(records.iter().all(|rec| rec.key != key));
        }
    }
}
