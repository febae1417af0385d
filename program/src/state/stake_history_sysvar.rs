use crate::error::StakeActivationError;

use super::{
    checked_entry_count, Epoch, LeReader, StakeHistoryEntry, StakeHistoryGetEntry,
    EPOCH_AND_ENTRY_SERIALIZED_SIZE, LENGTH_PREFIX_SIZE,
};

/// Zero-copy view over raw stake history sysvar data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct StakeHistorySysvar<'a> {
    data: &'a [u8],
    len: usize,
}

impl<'a> StakeHistorySysvar<'a> {
    /// Validates the length prefix against the buffer; entries are read lazily.
    pub fn new(data: &'a [u8]) -> Result<Self, StakeActivationError> {
        let len = checked_entry_count(data)?;
        Ok(Self { data, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Epoch, StakeHistoryEntry)> + '_ {
        (0..self.len).filter_map(move |index| self.entry_at(index))
    }

    fn entry_at(&self, index: usize) -> Option<(Epoch, StakeHistoryEntry)> {
        if index >= self.len {
            return None;
        }
        // offset is the number of bytes to our desired entry, including eight for vector length
        let offset = index
            .checked_mul(EPOCH_AND_ENTRY_SERIALIZED_SIZE)?
            .checked_add(LENGTH_PREFIX_SIZE)?;
        let entry_buf = self
            .data
            .get(offset..offset.checked_add(EPOCH_AND_ENTRY_SERIALIZED_SIZE)?)?;

        let mut reader = LeReader::new(entry_buf);
        let entry_epoch = reader.read_u64().ok()?;
        let entry = StakeHistoryEntry::read(&mut reader).ok()?;
        Some((entry_epoch, entry))
    }
}

impl StakeHistoryGetEntry for StakeHistorySysvar<'_> {
    /// First entry carrying `target_epoch`, the same entry [`StakeHistory`]
    /// returns for the decoded table.
    ///
    /// [`StakeHistory`]: super::StakeHistory
    fn get_entry(&self, target_epoch: Epoch) -> Option<StakeHistoryEntry> {
        self.iter()
            .find(|(entry_epoch, _)| *entry_epoch == target_epoch)
            .map(|(_, entry)| entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StakeHistory;

    fn entry(epoch: Epoch) -> StakeHistoryEntry {
        StakeHistoryEntry {
            effective: epoch * 100,
            activating: epoch * 10,
            deactivating: epoch,
        }
    }

    #[test]
    fn test_matches_owned_history() {
        let mut stake_history = StakeHistory::default();
        for epoch in 0..20 {
            stake_history.add(epoch, entry(epoch));
        }
        let data = stake_history.serialize();
        let sysvar = StakeHistorySysvar::new(&data).unwrap();

        assert_eq!(sysvar.len(), 20);
        for epoch in 0..25 {
            assert_eq!(sysvar.get_entry(epoch), stake_history.get_entry(epoch));
        }
    }

    #[test]
    fn test_finds_entries_around_gaps() {
        let stake_history: StakeHistory = [(30, entry(30)), (10, entry(10)), (9, entry(9))]
            .into_iter()
            .collect();
        let data = stake_history.serialize();
        let sysvar = StakeHistorySysvar::new(&data).unwrap();

        assert_eq!(sysvar.get_entry(30), Some(entry(30)));
        assert_eq!(sysvar.get_entry(10), Some(entry(10)));
        assert_eq!(sysvar.get_entry(9), Some(entry(9)));
        assert_eq!(sysvar.get_entry(29), None);
        assert_eq!(sysvar.get_entry(31), None);
    }

    #[test]
    fn test_duplicate_epoch_returns_first_entry() {
        let stake_history: StakeHistory = [(10, entry(1)), (8, entry(2)), (8, entry(3))]
            .into_iter()
            .collect();
        let data = stake_history.serialize();
        let sysvar = StakeHistorySysvar::new(&data).unwrap();

        assert_eq!(sysvar.get_entry(8), Some(entry(2)));
        assert_eq!(sysvar.get_entry(8), stake_history.get_entry(8));
    }

    #[test]
    fn test_empty_history() {
        let data = 0u64.to_le_bytes();
        let sysvar = StakeHistorySysvar::new(&data).unwrap();
        assert!(sysvar.is_empty());
        assert_eq!(sysvar.get_entry(0), None);
    }

    #[test]
    fn test_rejects_truncated_data() {
        let mut data = StakeHistory::from_iter([(1, entry(1)), (0, entry(0))]).serialize();
        data.pop();
        assert_eq!(
            StakeHistorySysvar::new(&data),
            Err(StakeActivationError::MalformedRecord)
        );
    }
}
