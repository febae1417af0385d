use core::ops::Add;

use crate::error::StakeActivationError;

use super::{LeReader, LeWriter};

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy)]
pub struct StakeHistoryEntry {
    pub effective: u64,    // effective stake at this epoch
    pub activating: u64,   // sum of portion of stakes not fully warmed up
    pub deactivating: u64, // requested to be cooled down, not fully deactivated yet
}

/// One delegation's split at a given epoch, in the same shape as a cluster entry.
pub type StakeActivationStatus = StakeHistoryEntry;

impl StakeHistoryEntry {
    pub const LEN: usize = 24;

    pub fn with_effective(effective: u64) -> Self {
        Self {
            effective,
            ..Self::default()
        }
    }

    pub fn with_effective_and_activating(effective: u64, activating: u64) -> Self {
        Self {
            effective,
            activating,
            ..Self::default()
        }
    }

    /// Everything still effective is on its way out.
    pub fn with_deactivating(deactivating: u64) -> Self {
        Self {
            effective: deactivating,
            deactivating,
            ..Self::default()
        }
    }

    pub fn read(reader: &mut LeReader) -> Result<Self, StakeActivationError> {
        Ok(Self {
            effective: reader.read_u64()?,
            activating: reader.read_u64()?,
            deactivating: reader.read_u64()?,
        })
    }

    pub fn write(&self, writer: &mut LeWriter) {
        writer.write_u64(self.effective);
        writer.write_u64(self.activating);
        writer.write_u64(self.deactivating);
    }
}

impl Add for StakeHistoryEntry {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            effective: self.effective.saturating_add(rhs.effective),
            activating: self.activating.saturating_add(rhs.activating),
            deactivating: self.deactivating.saturating_add(rhs.deactivating),
        }
    }
}
