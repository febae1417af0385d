use core::ops::Range;

use pinocchio::pubkey::Pubkey;
use pinocchio_pubkey::pubkey;

use crate::error::StakeActivationError;

use super::{Delegation, Epoch, LeReader, LeWriter, StakeHistoryEntry};

/// Address of the stake history sysvar.
pub const ID: Pubkey = pubkey!("SysvarStakeHistory1111111111111111111111111");

pub const MAX_ENTRIES: usize = 512; // it should never take as many as 512 epochs to warm up or cool down

// u64 element count in front of the entries
pub(crate) const LENGTH_PREFIX_SIZE: usize = 8;
pub(crate) const EPOCH_AND_ENTRY_SERIALIZED_SIZE: usize = 8 + StakeHistoryEntry::LEN;

pub trait StakeHistoryGetEntry {
    fn get_entry(&self, epoch: Epoch) -> Option<StakeHistoryEntry>;
}

/// Cluster stake history, newest epoch first.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct StakeHistory(Vec<(Epoch, StakeHistoryEntry)>);

impl StakeHistory {
    /// Linear scan on the epoch key; positions carry no meaning.
    pub fn get(&self, epoch: Epoch) -> Option<&StakeHistoryEntry> {
        self.0
            .iter()
            .find(|(entry_epoch, _)| *entry_epoch == epoch)
            .map(|(_, entry)| entry)
    }

    /// Records `entry` for `epoch`, replacing the first entry already holding
    /// that epoch. New epochs go in front of the first older one. Past
    /// [`MAX_ENTRIES`] the oldest epochs are dropped wherever they sit.
    pub fn add(&mut self, epoch: Epoch, entry: StakeHistoryEntry) {
        if let Some(slot) = self.0.iter_mut().find(|(entry_epoch, _)| *entry_epoch == epoch) {
            slot.1 = entry;
            return;
        }

        let index = self
            .0
            .iter()
            .position(|(entry_epoch, _)| *entry_epoch < epoch)
            .unwrap_or(self.0.len());
        self.0.insert(index, (epoch, entry));

        while self.0.len() > MAX_ENTRIES {
            let Some(oldest) = self
                .0
                .iter()
                .enumerate()
                .min_by_key(|(_, (entry_epoch, _))| *entry_epoch)
                .map(|(index, _)| index)
            else {
                break;
            };
            self.0.remove(oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Epoch, StakeHistoryEntry)> {
        self.0.iter()
    }

    /// Builds the history a cluster made of only `delegations` would record
    /// for each epoch in `epochs`.
    pub fn from_delegations(epochs: Range<Epoch>, delegations: &[Delegation]) -> Self {
        let mut stake_history = Self::default();
        for epoch in epochs {
            let entry = delegations
                .iter()
                .fold(StakeHistoryEntry::default(), |sum, delegation| {
                    sum + delegation.stake_activating_and_deactivating(epoch, &stake_history)
                });
            stake_history.add(epoch, entry);
        }
        stake_history
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, StakeActivationError> {
        let count = checked_entry_count(data)?;
        let mut reader = LeReader::new(data);
        reader.skip(LENGTH_PREFIX_SIZE)?;

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let epoch = reader.read_u64()?;
            entries.push((epoch, StakeHistoryEntry::read(&mut reader)?));
        }
        Ok(Self(entries))
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut writer = LeWriter::with_capacity(
            LENGTH_PREFIX_SIZE + self.0.len() * EPOCH_AND_ENTRY_SERIALIZED_SIZE,
        );
        writer.write_u64(self.0.len() as u64);
        for (epoch, entry) in &self.0 {
            writer.write_u64(*epoch);
            entry.write(&mut writer);
        }
        writer.into_inner()
    }
}

impl StakeHistoryGetEntry for StakeHistory {
    fn get_entry(&self, epoch: Epoch) -> Option<StakeHistoryEntry> {
        self.get(epoch).copied()
    }
}

impl FromIterator<(Epoch, StakeHistoryEntry)> for StakeHistory {
    fn from_iter<I: IntoIterator<Item = (Epoch, StakeHistoryEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads the element count and checks the buffer holds that many entries.
pub(crate) fn checked_entry_count(data: &[u8]) -> Result<usize, StakeActivationError> {
    let count = LeReader::new(data).read_u64()?;
    let count = usize::try_from(count).map_err(|_| StakeActivationError::MalformedRecord)?;
    let required = count
        .checked_mul(EPOCH_AND_ENTRY_SERIALIZED_SIZE)
        .and_then(|entries| entries.checked_add(LENGTH_PREFIX_SIZE))
        .ok_or(StakeActivationError::MalformedRecord)?;
    if data.len() < required {
        return Err(StakeActivationError::MalformedRecord);
    }
    Ok(count)
}
